//! Menu items and the filters customers and vendors browse them with.

use crate::model::ItemId;
use serde::{Deserialize, Serialize};

/// Highest price a catalog accepts for one item, in whole currency units.
pub const MAX_PRICE: u64 = 100_000;

/// One entry in a vendor's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    /// Whole currency units.
    pub price: u64,
    pub is_veg: bool,
    /// Free label used for the menu tabs.
    pub category: String,
    pub is_available: bool,
    pub is_recommended: bool,
}

/// Payload for adding an item to a catalog.
///
/// Without an `id` the catalog assigns the next free `item{n}`. New items
/// start out available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMenuItem {
    #[serde(default)]
    pub id: Option<ItemId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: u64,
    pub is_veg: bool,
    pub category: String,
    #[serde(default)]
    pub is_recommended: bool,
}

impl NewMenuItem {
    pub fn new(name: impl Into<String>, price: u64, category: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            price,
            is_veg: true,
            category: category.into(),
            is_recommended: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn non_veg(mut self) -> Self {
        self.is_veg = false;
        self
    }

    pub fn recommended(mut self) -> Self {
        self.is_recommended = true;
        self
    }
}

/// Partial edit of an existing item. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub is_veg: Option<bool>,
    pub category: Option<String>,
}

/// The tab a menu is being viewed under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryTab {
    #[default]
    All,
    Recommended,
    Named(String),
}

/// Browse criteria. The default shows every item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    pub category: CategoryTab,
    /// Case-insensitive match against name or description.
    pub query: Option<String>,
    pub veg_only: bool,
    pub available_only: bool,
}

impl MenuFilter {
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            category: CategoryTab::Named(name.into()),
            ..Self::default()
        }
    }

    pub fn recommended() -> Self {
        Self {
            category: CategoryTab::Recommended,
            ..Self::default()
        }
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn veg_only(mut self) -> Self {
        self.veg_only = true;
        self
    }

    pub fn available_only(mut self) -> Self {
        self.available_only = true;
        self
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        let in_tab = match &self.category {
            CategoryTab::All => true,
            CategoryTab::Recommended => item.is_recommended,
            CategoryTab::Named(name) => item.category == *name,
        };
        let in_search = match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                item.name.to_lowercase().contains(&query)
                    || item.description.to_lowercase().contains(&query)
            }
        };
        in_tab
            && in_search
            && (!self.veg_only || item.is_veg)
            && (!self.available_only || item.is_available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn momos() -> MenuItem {
        MenuItem {
            id: ItemId::from("item3"),
            name: "Chicken Momos (6 pcs)".to_string(),
            description: "Steamed dumplings with minced chicken filling".to_string(),
            price: 120,
            is_veg: false,
            category: "Momos".to_string(),
            is_available: true,
            is_recommended: true,
        }
    }

    #[test]
    fn default_filter_matches_everything() {
        assert!(MenuFilter::default().matches(&momos()));
    }

    #[test]
    fn tabs_select_by_category_or_recommendation() {
        let item = momos();
        assert!(MenuFilter::category("Momos").matches(&item));
        assert!(!MenuFilter::category("Thali").matches(&item));
        assert!(MenuFilter::recommended().matches(&item));
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let item = momos();
        assert!(MenuFilter::default().search("CHICKEN").matches(&item));
        assert!(MenuFilter::default().search("dumplings").matches(&item));
        assert!(MenuFilter::default().search("  ").matches(&item));
        assert!(!MenuFilter::default().search("paneer").matches(&item));
    }

    #[test]
    fn veg_and_availability_flags_narrow_the_result() {
        let mut item = momos();
        assert!(!MenuFilter::default().veg_only().matches(&item));

        item.is_veg = true;
        item.is_available = false;
        assert!(MenuFilter::default().veg_only().matches(&item));
        assert!(!MenuFilter::default().available_only().matches(&item));
    }
}
