use swadontime::catalog_actor::CatalogError;
use swadontime::config::Settings;
use swadontime::dashboard::{OrderFilter, VendorAction};
use swadontime::fixtures;
use swadontime::ledger::LedgerError;
use swadontime::lifecycle::OrderSystem;
use swadontime::menu_import::{parse_drafts, ImportError, MenuDraft};
use swadontime::model::{ItemId, MenuFilter, MenuItemPatch, NewMenuItem, OrderId, PaymentMethod, VendorId};
use swadontime::order_actor::{OrderError, RejectReason};
use swadontime::session::SessionError;
use swadontime::status::OrderStatus;
use std::time::Duration;

async fn seeded() -> (OrderSystem, VendorId) {
    let system = OrderSystem::new(Settings::default());
    let vendor_id = system
        .catalog_client
        .register_vendor(fixtures::spice_delight())
        .await
        .unwrap();
    (system, vendor_id)
}

#[tokio::test]
async fn test_customer_checkout_flow() {
    let (system, vendor_id) = seeded().await;
    let mut customer = system.customer_session();

    let vendor = customer.open_menu(vendor_id).await.unwrap();
    assert_eq!(vendor.name, "Spice Delight");
    assert_eq!(vendor.categories(), ["Momos", "Thali", "Chinese", "Beverages"]);

    let recommended = customer.browse(&MenuFilter::recommended()).await.unwrap();
    assert_eq!(recommended.len(), 4);
    let search = customer
        .browse(&MenuFilter::default().search("dumplings").veg_only())
        .await
        .unwrap();
    assert_eq!(search.len(), 2);

    let momos = ItemId::from("item1");
    let tea = ItemId::from("item7");
    customer.add_item(&momos).await.unwrap();
    customer.add_item(&momos).await.unwrap();
    customer.add_item(&tea).await.unwrap();
    customer.remove_item(&tea).unwrap();
    customer.set_quantity(&momos, 4).unwrap();
    assert_eq!(customer.quantity(&momos), 4);
    assert_eq!(customer.quantity(&tea), 0);
    assert_eq!(
        customer.set_quantity(&tea, 2),
        Err(SessionError::Ledger(LedgerError::NotFound(tea.clone())))
    );

    let totals = customer.totals().unwrap();
    assert_eq!((totals.subtotal, totals.delivery_fee, totals.taxes, totals.total), (320, 20, 16, 356));

    let order = customer.checkout(PaymentMethod::Upi).await.unwrap();
    assert_eq!(order.totals, totals);
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(order.estimated_minutes, 15);
    assert_eq!(order.queue_position, 3);
    assert!(customer.cart().unwrap().is_empty());

    // Catalog edits after checkout do not reach the placed order.
    system
        .catalog_client
        .edit_item(vendor_id, momos.clone(), MenuItemPatch { price: Some(95), ..MenuItemPatch::default() })
        .await
        .unwrap();
    let stored = system.order_client.get_order(order.id).await.unwrap();
    assert_eq!(stored.lines[0].unit_price, 80);
    assert_eq!(stored.totals.total, 356);

    drop(customer);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_checkout_keeps_the_cart() {
    let (system, vendor_id) = seeded().await;
    let mut customer = system.customer_session();
    customer.open_menu(vendor_id).await.unwrap();

    assert_eq!(
        customer.checkout(PaymentMethod::Cash).await,
        Err(SessionError::Order(OrderError::Rejected(RejectReason::EmptyOrder)))
    );

    let thali = ItemId::from("item4");
    customer.add_item(&thali).await.unwrap();
    // The vendor runs out between add and checkout.
    system
        .catalog_client
        .toggle_availability(vendor_id, thali.clone())
        .await
        .unwrap();

    assert_eq!(
        customer.checkout(PaymentMethod::Cash).await,
        Err(SessionError::Order(OrderError::Rejected(RejectReason::ItemUnavailable(thali.clone()))))
    );
    assert_eq!(customer.quantity(&thali), 1);
    assert_eq!(
        customer.add_item(&thali).await,
        Err(SessionError::ItemUnavailable(thali))
    );

    drop(customer);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_vendor_dashboard_lifecycle() {
    let (system, vendor_id) = seeded().await;
    let mut customer = system.customer_session();
    customer.open_menu(vendor_id).await.unwrap();

    let mut placed = Vec::new();
    for item in ["item1", "item5", "item7"] {
        customer.add_item(&ItemId::from(item)).await.unwrap();
        placed.push(customer.checkout(PaymentMethod::Cash).await.unwrap());
    }
    let dashboard = system.vendor_dashboard(vendor_id);

    let newest_first: Vec<_> = dashboard
        .orders(OrderFilter::All)
        .await
        .unwrap()
        .into_iter()
        .map(|order| order.id)
        .collect();
    assert_eq!(newest_first, vec![placed[2].id, placed[1].id, placed[0].id]);

    dashboard.start_preparing(placed[0].id).await.unwrap();
    dashboard.mark_ready(placed[0].id).await.unwrap();
    dashboard.complete(placed[0].id).await.unwrap();
    dashboard.perform(placed[1].id, VendorAction::StartPreparing).await.unwrap();
    dashboard.cancel(placed[2].id).await.unwrap();

    // Completed orders cannot be reopened.
    assert!(matches!(
        dashboard.start_preparing(placed[0].id).await,
        Err(OrderError::InvalidTransition(_))
    ));

    let stats = dashboard.stats().await.unwrap();
    assert_eq!(stats.total_orders, 3);
    assert_eq!(stats.pending_orders, 0);
    assert_eq!(stats.active_orders, 1);
    // 80 + 20 + 4 and 180 + 20 + 9; the cancelled tea is left out
    assert_eq!(stats.revenue, 104 + 209);

    let cancelled = dashboard
        .orders(OrderFilter::Status(OrderStatus::Cancelled))
        .await
        .unwrap();
    assert_eq!(cancelled.len(), 1);

    // Another vendor's dashboard cannot touch these orders.
    let other = system.vendor_dashboard(VendorId(42));
    assert_eq!(
        other.start_preparing(placed[1].id).await,
        Err(OrderError::NotFound(placed[1].id))
    );
    assert!(other.orders(OrderFilter::All).await.unwrap().is_empty());

    drop(customer);
    drop(dashboard);
    drop(other);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_menu_import_into_catalog() {
    let system = OrderSystem::new(Settings::default());
    let catalog = &system.catalog_client;
    let mut ids = Vec::new();
    for vendor in fixtures::vendors() {
        ids.push(catalog.register_vendor(vendor).await.unwrap());
    }
    let momo_house = ids[1];
    assert_eq!(
        catalog.find_by_slug("momo-house").await.unwrap().map(|vendor| vendor.id),
        Some(momo_house)
    );
    assert_eq!(catalog.search_vendors("chinese").await.unwrap().len(), 3);

    let mut drafts = fixtures::extracted_menu();
    drafts.push(MenuDraft::new("Thukpa", "90 rs", "Soups", false));
    assert_eq!(
        parse_drafts(&drafts),
        Err(ImportError::InvalidPrice {
            row: 6,
            value: "90 rs".to_string()
        })
    );

    // A price that would overflow the cart totals never reaches the catalog.
    drafts.pop();
    drafts.push(MenuDraft::new("Gold Thali", "18446744073709551615", "Thali", true));
    assert_eq!(
        parse_drafts(&drafts),
        Err(ImportError::InvalidPrice {
            row: 6,
            value: "18446744073709551615".to_string()
        })
    );
    assert!(matches!(
        catalog
            .add_item(momo_house, NewMenuItem::new("Gold Thali", u64::MAX, "Thali"))
            .await,
        Err(CatalogError::InvalidItem(_))
    ));

    drafts.pop();
    let items = parse_drafts(&drafts).unwrap();
    let added = catalog.import_items(momo_house, items).await.unwrap();
    assert_eq!(added.len(), 5);
    assert_eq!(added[0].id, ItemId::from("item1"));

    let non_veg = catalog
        .browse(momo_house, &MenuFilter::category("Momos"))
        .await
        .unwrap()
        .into_iter()
        .filter(|item| !item.is_veg)
        .count();
    assert_eq!(non_veg, 1);

    assert_eq!(
        catalog.import_items(VendorId(99), Vec::new()).await,
        Err(CatalogError::VendorNotFound(VendorId(99)))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_subscription_follows_the_order_to_the_end() {
    let (system, vendor_id) = seeded().await;
    let mut customer = system.customer_session();
    customer.open_menu(vendor_id).await.unwrap();
    customer.add_item(&ItemId::from("item2")).await.unwrap();
    let order = customer.checkout(PaymentMethod::Upi).await.unwrap();

    let mut subscription = customer.track(order.id).await.unwrap();
    assert_eq!(subscription.next().await.unwrap().status, OrderStatus::Confirmed);

    let orders = system.order_client.clone();
    orders.advance_to(order.id, OrderStatus::Preparing).await.unwrap();
    assert_eq!(subscription.next().await.unwrap().status, OrderStatus::Preparing);

    orders.cancel(order.id).await.unwrap();
    let last = subscription.next().await.unwrap();
    assert_eq!(last.status, OrderStatus::Cancelled);
    assert!(subscription.next().await.is_none());

    // A settled order yields its final snapshot and ends.
    let mut late = customer.track(order.id).await.unwrap();
    assert_eq!(late.next().await.unwrap().status, OrderStatus::Cancelled);
    assert!(late.next().await.is_none());

    assert!(matches!(
        customer.track(OrderId(1)).await,
        Err(SessionError::Order(OrderError::NotFound(_)))
    ));

    drop(orders);
    drop(customer);
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_reports_that_change_nothing_are_not_published() {
    let (system, vendor_id) = seeded().await;
    let mut customer = system.customer_session();
    customer.open_menu(vendor_id).await.unwrap();
    customer.add_item(&ItemId::from("item1")).await.unwrap();
    let order = customer.checkout(PaymentMethod::Upi).await.unwrap();

    let mut subscription = customer.track(order.id).await.unwrap();
    assert_eq!(subscription.next().await.unwrap().estimated_minutes, 15);

    // Neither report lowers anything, so the order is unchanged.
    let orders = system.order_client.clone();
    orders.report_eta(order.id, 20).await.unwrap();
    orders.report_queue_position(order.id, 5).await.unwrap();
    assert!(
        tokio::time::timeout(Duration::from_secs(1), subscription.next())
            .await
            .is_err(),
        "no snapshot for an unchanged order"
    );

    orders.report_eta(order.id, 12).await.unwrap();
    assert_eq!(subscription.next().await.unwrap().estimated_minutes, 12);

    drop(orders);
    drop(customer);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_zero_channel_capacity_still_starts() {
    let settings = Settings {
        channel_capacity: 0,
        ..Settings::default()
    };
    let system = OrderSystem::new(settings);
    let vendor_id = system
        .catalog_client
        .register_vendor(fixtures::spice_delight())
        .await
        .unwrap();
    assert!(system.catalog_client.get_vendor(vendor_id).await.unwrap().is_some());
    system.shutdown().await.unwrap();
}
