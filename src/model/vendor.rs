use crate::model::{ItemId, MenuFilter, MenuItem, NewMenuItem, VendorId};
use serde::{Deserialize, Serialize};

/// A restaurant and its catalog.
///
/// # Actor Framework
/// Managed by the catalog actor; see
/// [`impl ActorEntity for Vendor`](#impl-ActorEntity-for-Vendor) for the
/// menu-management actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vendor {
    pub id: VendorId,
    /// URL-style handle such as `spice-delight`.
    pub slug: String,
    pub name: String,
    pub cuisine: String,
    pub address: String,
    /// Shown as-is, e.g. `15-20 min`.
    pub preparation_time: String,
    pub menu: Vec<MenuItem>,
    #[serde(skip)]
    pub(crate) next_item: u32,
}

/// Payload for registering a vendor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorCreate {
    pub slug: String,
    pub name: String,
    pub cuisine: String,
    pub address: String,
    pub preparation_time: String,
    #[serde(default)]
    pub menu: Vec<NewMenuItem>,
}

/// Profile edit. Menu changes go through catalog actions instead.
#[derive(Debug, Clone, Default)]
pub struct VendorUpdate {
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub preparation_time: Option<String>,
}

impl Vendor {
    pub fn item(&self, id: &ItemId) -> Option<&MenuItem> {
        self.menu.iter().find(|item| item.id == *id)
    }

    /// Items matching `filter`, in catalog order.
    pub fn browse(&self, filter: &MenuFilter) -> Vec<MenuItem> {
        self.menu
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect()
    }

    /// Distinct categories in the order they first appear.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for item in &self.menu {
            if !seen.contains(&item.category) {
                seen.push(item.category.clone());
            }
        }
        seen
    }

    pub(crate) fn item_mut(&mut self, id: &ItemId) -> Option<&mut MenuItem> {
        self.menu.iter_mut().find(|item| item.id == *id)
    }

    /// Next `item{n}` not already taken.
    pub(crate) fn next_item_id(&mut self) -> ItemId {
        loop {
            let candidate = ItemId(format!("item{}", self.next_item));
            self.next_item += 1;
            if self.item(&candidate).is_none() {
                return candidate;
            }
        }
    }
}
