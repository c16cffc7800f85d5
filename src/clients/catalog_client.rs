//! # Catalog Client
//!
//! High-level API over the catalog actor: vendor registration and lookup,
//! menu browsing, and the vendor's menu-management operations.

use crate::catalog_actor::{CatalogAction, CatalogActionResult, CatalogError};
use crate::model::{
    ItemId, MenuFilter, MenuItem, MenuItemPatch, NewMenuItem, Vendor, VendorCreate, VendorId,
    VendorUpdate,
};
use async_trait::async_trait;
use swad_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Catalog actor.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    inner: ResourceClient<Vendor>,
}

#[async_trait]
impl ActorClient<Vendor> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Vendor> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<CatalogError>() {
            Ok(domain) => domain,
            Err(other) => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Vendor>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(slug = %params.slug))]
    pub async fn register_vendor(&self, params: VendorCreate) -> Result<VendorId, CatalogError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(vendor_id = %id, "Vendor registered");
        Ok(id)
    }

    pub async fn get_vendor(&self, id: VendorId) -> Result<Option<Vendor>, CatalogError> {
        self.get(id).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_vendor(
        &self,
        id: VendorId,
        update: VendorUpdate,
    ) -> Result<Vendor, CatalogError> {
        self.inner
            .update(id, update)
            .await
            .map_err(|e| not_found_as_vendor(e, id))
    }

    /// Vendors whose name or cuisine contains `query`, ignoring case.
    #[instrument(skip(self))]
    pub async fn search_vendors(&self, query: &str) -> Result<Vec<Vendor>, CatalogError> {
        let query = query.trim().to_lowercase();
        let mut vendors: Vec<Vendor> = self
            .list()
            .await?
            .into_iter()
            .filter(|vendor| {
                vendor.name.to_lowercase().contains(&query)
                    || vendor.cuisine.to_lowercase().contains(&query)
            })
            .collect();
        vendors.sort_by_key(|vendor| vendor.id);
        Ok(vendors)
    }

    #[instrument(skip(self))]
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Vendor>, CatalogError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|vendor| vendor.slug == slug))
    }

    /// Looks a single item up, failing if the vendor or the item is unknown.
    #[instrument(skip(self))]
    pub async fn get_menu_item(
        &self,
        vendor_id: VendorId,
        item_id: &ItemId,
    ) -> Result<MenuItem, CatalogError> {
        let vendor = self.require_vendor(vendor_id).await?;
        vendor
            .item(item_id)
            .cloned()
            .ok_or_else(|| CatalogError::ItemNotFound {
                vendor_id,
                item_id: item_id.clone(),
            })
    }

    #[instrument(skip(self))]
    pub async fn browse(
        &self,
        vendor_id: VendorId,
        filter: &MenuFilter,
    ) -> Result<Vec<MenuItem>, CatalogError> {
        let vendor = self.require_vendor(vendor_id).await?;
        let items = vendor.browse(filter);
        debug!(matched = items.len(), of = vendor.menu.len(), "Browsed menu");
        Ok(items)
    }

    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn add_item(
        &self,
        vendor_id: VendorId,
        item: NewMenuItem,
    ) -> Result<MenuItem, CatalogError> {
        self.item_action(vendor_id, CatalogAction::AddItem(item))
            .await
    }

    #[instrument(skip(self, patch))]
    pub async fn edit_item(
        &self,
        vendor_id: VendorId,
        item_id: ItemId,
        patch: MenuItemPatch,
    ) -> Result<MenuItem, CatalogError> {
        self.item_action(vendor_id, CatalogAction::EditItem(item_id, patch))
            .await
    }

    /// Removes an item, returning it as it was.
    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        vendor_id: VendorId,
        item_id: ItemId,
    ) -> Result<MenuItem, CatalogError> {
        self.item_action(vendor_id, CatalogAction::RemoveItem(item_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn toggle_availability(
        &self,
        vendor_id: VendorId,
        item_id: ItemId,
    ) -> Result<MenuItem, CatalogError> {
        self.item_action(vendor_id, CatalogAction::ToggleAvailability(item_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn toggle_recommended(
        &self,
        vendor_id: VendorId,
        item_id: ItemId,
    ) -> Result<MenuItem, CatalogError> {
        self.item_action(vendor_id, CatalogAction::ToggleRecommended(item_id))
            .await
    }

    /// Adds every item or none of them.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn import_items(
        &self,
        vendor_id: VendorId,
        items: Vec<NewMenuItem>,
    ) -> Result<Vec<MenuItem>, CatalogError> {
        match self
            .perform(vendor_id, CatalogAction::ImportItems(items))
            .await?
        {
            CatalogActionResult::Imported(added) => {
                info!(count = added.len(), "Menu items imported");
                Ok(added)
            }
            other => Err(unexpected(other)),
        }
    }

    async fn require_vendor(&self, vendor_id: VendorId) -> Result<Vendor, CatalogError> {
        self.get(vendor_id)
            .await?
            .ok_or(CatalogError::VendorNotFound(vendor_id))
    }

    async fn item_action(
        &self,
        vendor_id: VendorId,
        action: CatalogAction,
    ) -> Result<MenuItem, CatalogError> {
        match self.perform(vendor_id, action).await? {
            CatalogActionResult::Item(item) => Ok(item),
            other => Err(unexpected(other)),
        }
    }

    async fn perform(
        &self,
        vendor_id: VendorId,
        action: CatalogAction,
    ) -> Result<CatalogActionResult, CatalogError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(vendor_id, action)
            .await
            .map_err(|e| not_found_as_vendor(e, vendor_id))
    }
}

fn not_found_as_vendor(e: FrameworkError, vendor_id: VendorId) -> CatalogError {
    match e {
        FrameworkError::NotFound(_) => CatalogError::VendorNotFound(vendor_id),
        other => CatalogClient::map_error(other),
    }
}

fn unexpected(result: CatalogActionResult) -> CatalogError {
    CatalogError::ActorCommunicationError(format!("unexpected catalog reply: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use swad_framework::mock::{create_mock_client, expect_action, MockClient};

    fn spice_delight() -> Vendor {
        use swad_framework::ActorEntity;
        Vendor::from_create_params(
            VendorId(1),
            VendorCreate {
                slug: "spice-delight".to_string(),
                name: "Spice Delight".to_string(),
                cuisine: "North Indian, Chinese".to_string(),
                menu: vec![
                    NewMenuItem::new("Veg Momos (6 pcs)", 80, "Momos").recommended(),
                    NewMenuItem::new("Chicken Momos (6 pcs)", 120, "Momos").non_veg(),
                    NewMenuItem::new("Masala Tea", 30, "Beverages"),
                ],
                ..VendorCreate::default()
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn get_menu_item_distinguishes_missing_vendor_and_item() {
        let mut mock = MockClient::<Vendor>::new();
        mock.expect_get(VendorId(1)).return_ok(Some(spice_delight()));
        mock.expect_get(VendorId(1)).return_ok(Some(spice_delight()));
        mock.expect_get(VendorId(2)).return_ok(None);
        let catalog = CatalogClient::new(mock.client());

        let momos = catalog
            .get_menu_item(VendorId(1), &ItemId::from("item1"))
            .await
            .unwrap();
        assert_eq!(momos.price, 80);

        assert_eq!(
            catalog.get_menu_item(VendorId(1), &ItemId::from("item9")).await,
            Err(CatalogError::ItemNotFound {
                vendor_id: VendorId(1),
                item_id: ItemId::from("item9"),
            })
        );
        assert_eq!(
            catalog.get_menu_item(VendorId(2), &ItemId::from("item1")).await,
            Err(CatalogError::VendorNotFound(VendorId(2)))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn browse_applies_the_filter() {
        let mut mock = MockClient::<Vendor>::new();
        mock.expect_get(VendorId(1)).return_ok(Some(spice_delight()));
        let catalog = CatalogClient::new(mock.client());

        let veg_momos = catalog
            .browse(VendorId(1), &MenuFilter::category("Momos").veg_only())
            .await
            .unwrap();
        assert_eq!(veg_momos.len(), 1);
        assert_eq!(veg_momos[0].name, "Veg Momos (6 pcs)");
        mock.verify();
    }

    #[tokio::test]
    async fn toggle_availability_sends_the_action() {
        let (client, mut receiver) = create_mock_client::<Vendor>(10);
        let catalog = CatalogClient::new(client);

        let task = tokio::spawn(async move {
            catalog
                .toggle_availability(VendorId(1), ItemId::from("item2"))
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, VendorId(1));
        let item_id = match action {
            CatalogAction::ToggleAvailability(item_id) => item_id,
            other => panic!("Expected ToggleAvailability, got {other:?}"),
        };

        let mut item = spice_delight().item(&item_id).cloned().unwrap();
        item.is_available = false;
        responder.send(Ok(CatalogActionResult::Item(item))).unwrap();

        let toggled = task.await.unwrap().unwrap();
        assert!(!toggled.is_available);
    }

    #[tokio::test]
    async fn entity_errors_come_back_typed() {
        let mut mock = MockClient::<Vendor>::new();
        mock.expect_action(VendorId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                CatalogError::DuplicateItem(ItemId::from("item1")),
            )));
        mock.expect_action(VendorId(7))
            .return_err(FrameworkError::NotFound("vendor_7".to_string()));
        let catalog = CatalogClient::new(mock.client());

        let item = NewMenuItem::new("Veg Momos", 80, "Momos").with_id("item1");
        assert_eq!(
            catalog.add_item(VendorId(1), item.clone()).await,
            Err(CatalogError::DuplicateItem(ItemId::from("item1")))
        );
        assert_eq!(
            catalog.add_item(VendorId(7), item).await,
            Err(CatalogError::VendorNotFound(VendorId(7)))
        );
        mock.verify();
    }
}
