//! ActorEntity implementation for the Vendor domain type.

use crate::catalog_actor::{CatalogAction, CatalogActionResult, CatalogError};
use crate::model::{
    ItemId, MenuItem, MenuItemPatch, NewMenuItem, Vendor, VendorCreate, VendorId, VendorUpdate,
    MAX_PRICE,
};
use async_trait::async_trait;
use swad_framework::ActorEntity;
use tracing::debug;

#[async_trait]
impl ActorEntity for Vendor {
    type Id = VendorId;
    type Create = VendorCreate;
    type Update = VendorUpdate;
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;
    type Context = ();
    type Error = CatalogError;

    /// Builds the vendor with its initial menu. Item rules are the same as
    /// for [`CatalogAction::AddItem`].
    fn from_create_params(id: VendorId, params: VendorCreate) -> Result<Self, Self::Error> {
        let mut vendor = Self {
            id,
            slug: params.slug,
            name: params.name,
            cuisine: params.cuisine,
            address: params.address,
            preparation_time: params.preparation_time,
            menu: Vec::new(),
            next_item: 1,
        };
        for item in params.menu {
            vendor.insert_item(item)?;
        }
        Ok(vendor)
    }

    async fn on_update(&mut self, update: VendorUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(cuisine) = update.cuisine {
            self.cuisine = cuisine;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(preparation_time) = update.preparation_time {
            self.preparation_time = preparation_time;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CatalogAction,
        _ctx: &(),
    ) -> Result<CatalogActionResult, Self::Error> {
        match action {
            CatalogAction::AddItem(item) => self.insert_item(item).map(CatalogActionResult::Item),
            CatalogAction::EditItem(id, patch) => {
                self.edit_item(&id, patch).map(CatalogActionResult::Item)
            }
            CatalogAction::RemoveItem(id) => {
                let index = self
                    .menu
                    .iter()
                    .position(|item| item.id == id)
                    .ok_or_else(|| self.missing(&id))?;
                Ok(CatalogActionResult::Item(self.menu.remove(index)))
            }
            CatalogAction::ToggleAvailability(id) => {
                let vendor_id = self.id;
                let item = self.item_or_missing(&id)?;
                item.is_available = !item.is_available;
                debug!(%vendor_id, item_id = %id, available = item.is_available, "Availability toggled");
                Ok(CatalogActionResult::Item(item.clone()))
            }
            CatalogAction::ToggleRecommended(id) => {
                let item = self.item_or_missing(&id)?;
                item.is_recommended = !item.is_recommended;
                Ok(CatalogActionResult::Item(item.clone()))
            }
            CatalogAction::ImportItems(items) => {
                // Stage on a copy so a bad row leaves the catalog untouched.
                let mut staged = self.clone();
                let mut added = Vec::with_capacity(items.len());
                for item in items {
                    added.push(staged.insert_item(item)?);
                }
                *self = staged;
                Ok(CatalogActionResult::Imported(added))
            }
        }
    }
}

impl Vendor {
    fn insert_item(&mut self, item: NewMenuItem) -> Result<MenuItem, CatalogError> {
        let name = item.name.trim().to_string();
        let category = item.category.trim().to_string();
        validate(&name, &category, item.price)?;

        let id = match item.id {
            Some(id) if self.item(&id).is_some() => return Err(CatalogError::DuplicateItem(id)),
            Some(id) => id,
            None => self.next_item_id(),
        };
        let added = MenuItem {
            id,
            name,
            description: item.description.trim().to_string(),
            price: item.price,
            is_veg: item.is_veg,
            category,
            is_available: true,
            is_recommended: item.is_recommended,
        };
        self.menu.push(added.clone());
        Ok(added)
    }

    fn edit_item(&mut self, id: &ItemId, patch: MenuItemPatch) -> Result<MenuItem, CatalogError> {
        let mut edited = self
            .item(id)
            .cloned()
            .ok_or_else(|| self.missing(id))?;
        if let Some(name) = patch.name {
            edited.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            edited.description = description.trim().to_string();
        }
        if let Some(price) = patch.price {
            edited.price = price;
        }
        if let Some(is_veg) = patch.is_veg {
            edited.is_veg = is_veg;
        }
        if let Some(category) = patch.category {
            edited.category = category.trim().to_string();
        }
        validate(&edited.name, &edited.category, edited.price)?;

        let slot = self.item_or_missing(id)?;
        *slot = edited.clone();
        Ok(edited)
    }

    fn item_or_missing(&mut self, id: &ItemId) -> Result<&mut MenuItem, CatalogError> {
        let missing = self.missing(id);
        self.item_mut(id).ok_or(missing)
    }

    fn missing(&self, id: &ItemId) -> CatalogError {
        CatalogError::ItemNotFound {
            vendor_id: self.id,
            item_id: id.clone(),
        }
    }
}

fn validate(name: &str, category: &str, price: u64) -> Result<(), CatalogError> {
    if name.is_empty() {
        return Err(CatalogError::InvalidItem("name must not be empty".to_string()));
    }
    if category.is_empty() {
        return Err(CatalogError::InvalidItem(format!(
            "category must not be empty for {name}"
        )));
    }
    if price > MAX_PRICE {
        return Err(CatalogError::InvalidItem(format!(
            "price {price} for {name} is above {MAX_PRICE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor() -> Vendor {
        Vendor::from_create_params(
            VendorId(1),
            VendorCreate {
                slug: "spice-delight".to_string(),
                name: "Spice Delight".to_string(),
                menu: vec![
                    NewMenuItem::new("Veg Momos (6 pcs)", 80, "Momos").recommended(),
                    NewMenuItem::new("Masala Tea", 30, "Beverages"),
                ],
                ..VendorCreate::default()
            },
        )
        .unwrap()
    }

    async fn act(vendor: &mut Vendor, action: CatalogAction) -> Result<CatalogActionResult, CatalogError> {
        vendor.handle_action(action, &()).await
    }

    #[test]
    fn initial_menu_gets_sequential_ids() {
        let vendor = vendor();
        let ids: Vec<&str> = vendor.menu.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["item1", "item2"]);
        assert!(vendor.menu.iter().all(|item| item.is_available));
        assert_eq!(vendor.categories(), ["Momos", "Beverages"]);
    }

    #[tokio::test]
    async fn generated_ids_skip_explicit_ones() {
        let mut vendor = vendor();
        act(&mut vendor, CatalogAction::AddItem(NewMenuItem::new("Thali", 150, "Thali").with_id("item3")))
            .await
            .unwrap();
        let CatalogActionResult::Item(added) =
            act(&mut vendor, CatalogAction::AddItem(NewMenuItem::new("Fried Rice", 120, "Chinese")))
                .await
                .unwrap()
        else {
            panic!("expected an item");
        };
        assert_eq!(added.id, ItemId::from("item4"));
    }

    #[tokio::test]
    async fn duplicate_and_blank_items_are_rejected() {
        let mut vendor = vendor();
        let duplicate = NewMenuItem::new("Again", 10, "Momos").with_id("item1");
        assert_eq!(
            act(&mut vendor, CatalogAction::AddItem(duplicate)).await.unwrap_err(),
            CatalogError::DuplicateItem(ItemId::from("item1"))
        );
        let blank = NewMenuItem::new("   ", 10, "Momos");
        assert!(matches!(
            act(&mut vendor, CatalogAction::AddItem(blank)).await,
            Err(CatalogError::InvalidItem(_))
        ));
        assert_eq!(vendor.menu.len(), 2);
    }

    #[tokio::test]
    async fn prices_above_the_ceiling_are_rejected() {
        let mut vendor = vendor();
        let gold = NewMenuItem::new("Gold Thali", u64::MAX, "Thali");
        assert!(matches!(
            act(&mut vendor, CatalogAction::AddItem(gold)).await,
            Err(CatalogError::InvalidItem(_))
        ));
        assert_eq!(vendor.menu.len(), 2);

        let id = ItemId::from("item1");
        let patch = MenuItemPatch {
            price: Some(MAX_PRICE + 1),
            ..MenuItemPatch::default()
        };
        assert!(matches!(
            act(&mut vendor, CatalogAction::EditItem(id.clone(), patch)).await,
            Err(CatalogError::InvalidItem(_))
        ));
        assert_eq!(vendor.item(&id).unwrap().price, 80);

        let at_ceiling = MenuItemPatch {
            price: Some(MAX_PRICE),
            ..MenuItemPatch::default()
        };
        act(&mut vendor, CatalogAction::EditItem(id.clone(), at_ceiling)).await.unwrap();
        assert_eq!(vendor.item(&id).unwrap().price, MAX_PRICE);
    }

    #[tokio::test]
    async fn edit_applies_the_patch_or_nothing() {
        let mut vendor = vendor();
        let id = ItemId::from("item2");
        let patch = MenuItemPatch {
            price: Some(35),
            description: Some("Traditional Indian spiced tea".to_string()),
            ..MenuItemPatch::default()
        };
        act(&mut vendor, CatalogAction::EditItem(id.clone(), patch)).await.unwrap();
        assert_eq!(vendor.item(&id).unwrap().price, 35);

        let bad = MenuItemPatch {
            price: Some(1),
            category: Some(String::new()),
            ..MenuItemPatch::default()
        };
        assert!(act(&mut vendor, CatalogAction::EditItem(id.clone(), bad)).await.is_err());
        assert_eq!(vendor.item(&id).unwrap().price, 35);
    }

    #[tokio::test]
    async fn toggles_flip_flags() {
        let mut vendor = vendor();
        let id = ItemId::from("item1");
        act(&mut vendor, CatalogAction::ToggleAvailability(id.clone())).await.unwrap();
        act(&mut vendor, CatalogAction::ToggleRecommended(id.clone())).await.unwrap();

        let item = vendor.item(&id).unwrap();
        assert!(!item.is_available);
        assert!(!item.is_recommended);
    }

    #[tokio::test]
    async fn remove_unknown_item_reports_not_found() {
        let mut vendor = vendor();
        assert_eq!(
            act(&mut vendor, CatalogAction::RemoveItem(ItemId::from("item9"))).await.unwrap_err(),
            CatalogError::ItemNotFound {
                vendor_id: VendorId(1),
                item_id: ItemId::from("item9"),
            }
        );
        act(&mut vendor, CatalogAction::RemoveItem(ItemId::from("item1"))).await.unwrap();
        assert_eq!(vendor.menu.len(), 1);
    }

    #[tokio::test]
    async fn import_is_all_or_nothing() {
        let mut vendor = vendor();
        let batch = vec![
            NewMenuItem::new("Chicken Momos", 120, "Momos").non_veg(),
            NewMenuItem::new("", 30, "Beverages"),
        ];
        assert!(act(&mut vendor, CatalogAction::ImportItems(batch)).await.is_err());
        assert_eq!(vendor.menu.len(), 2);

        let batch = vec![
            NewMenuItem::new("Chicken Momos", 120, "Momos").non_veg(),
            NewMenuItem::new("Veg Fried Rice", 120, "Chinese"),
        ];
        let CatalogActionResult::Imported(added) =
            act(&mut vendor, CatalogAction::ImportItems(batch)).await.unwrap()
        else {
            panic!("expected imported items");
        };
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].id, ItemId::from("item3"));
        assert_eq!(vendor.menu.len(), 4);
    }
}
