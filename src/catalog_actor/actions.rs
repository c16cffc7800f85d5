//! Custom actions for the Catalog actor.
//!
//! Menu management beyond the vendor profile CRUD: adding, editing and
//! removing items, the availability and recommendation toggles, and bulk
//! import. Handled by
//! [`ActorEntity::handle_action`](swad_framework::ActorEntity::handle_action)
//! on [`Vendor`](crate::model::Vendor).

use crate::model::{ItemId, MenuItem, MenuItemPatch, NewMenuItem};

#[derive(Debug, Clone)]
pub enum CatalogAction {
    AddItem(NewMenuItem),
    EditItem(ItemId, MenuItemPatch),
    RemoveItem(ItemId),
    ToggleAvailability(ItemId),
    ToggleRecommended(ItemId),
    /// All or nothing: one invalid item rejects the whole batch.
    ImportItems(Vec<NewMenuItem>),
}

/// Results from CatalogActions.
#[derive(Debug, Clone)]
pub enum CatalogActionResult {
    /// The added, edited, toggled or removed item as it now is (or last was).
    Item(MenuItem),
    /// Items created by an import, in input order.
    Imported(Vec<MenuItem>),
}
