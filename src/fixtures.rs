//! Seed data for the demo binary and the integration tests.

use crate::menu_import::MenuDraft;
use crate::model::{NewMenuItem, VendorCreate};

pub fn spice_delight() -> VendorCreate {
    VendorCreate {
        slug: "spice-delight".to_string(),
        name: "Spice Delight".to_string(),
        cuisine: "North Indian, Chinese".to_string(),
        address: "123 Food Street, Foodville".to_string(),
        preparation_time: "15-20 min".to_string(),
        menu: vec![
            NewMenuItem::new("Veg Momos (6 pcs)", 80, "Momos")
                .with_description("Steamed dumplings filled with mixed vegetables and spices")
                .recommended(),
            NewMenuItem::new("Paneer Momos (6 pcs)", 100, "Momos")
                .with_description("Steamed dumplings with spiced cottage cheese filling")
                .recommended(),
            NewMenuItem::new("Chicken Momos (6 pcs)", 120, "Momos")
                .with_description("Steamed dumplings with minced chicken filling")
                .non_veg()
                .recommended(),
            NewMenuItem::new("Veg Thali", 150, "Thali")
                .with_description("Complete meal with rice, dal, 2 sabzis, roti, salad and dessert"),
            NewMenuItem::new("Special Thali", 180, "Thali")
                .with_description(
                    "Deluxe thali with paneer, rice, dal, 2 sabzis, roti, salad and dessert",
                )
                .recommended(),
            NewMenuItem::new("Veg Fried Rice", 120, "Chinese")
                .with_description("Stir-fried rice with mixed vegetables and soy sauce"),
            NewMenuItem::new("Masala Tea", 30, "Beverages")
                .with_description("Traditional Indian spiced tea"),
        ],
    }
}

/// Every seeded vendor. Only Spice Delight has a menu.
pub fn vendors() -> Vec<VendorCreate> {
    let listing = |slug: &str, name: &str, cuisine: &str, preparation_time: &str| VendorCreate {
        slug: slug.to_string(),
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        preparation_time: preparation_time.to_string(),
        ..VendorCreate::default()
    };
    vec![
        spice_delight(),
        listing("momo-house", "Momo House", "Tibetan, Chinese", "10-15 min"),
        listing("punjabi-dhaba", "Punjabi Dhaba", "North Indian", "20-25 min"),
        listing("chinese-wok", "Chinese Wok", "Chinese, Thai", ""),
    ]
}

/// Rows as a menu-photo extraction would hand them over.
pub fn extracted_menu() -> Vec<MenuDraft> {
    vec![
        MenuDraft::new("Veg Momos", "80", "Momos", true),
        MenuDraft::new("Paneer Momos", "100", "Momos", true),
        MenuDraft::new("Chicken Momos", "120", "Momos", false),
        MenuDraft::new("Veg Fried Rice", "120", "Chinese", true),
        MenuDraft::new("Masala Tea", "30", "Beverages", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu_import::parse_drafts;

    #[test]
    fn seed_menu_matches_the_storefront() {
        let vendor = spice_delight();
        assert_eq!(vendor.menu.len(), 7);
        assert_eq!(vendor.menu.iter().filter(|item| item.is_recommended).count(), 4);
        assert_eq!(vendor.menu.iter().filter(|item| !item.is_veg).count(), 1);
        assert_eq!(vendors().len(), 4);
    }

    #[test]
    fn extracted_rows_parse() {
        assert_eq!(parse_drafts(&extracted_menu()).unwrap().len(), 5);
    }
}
