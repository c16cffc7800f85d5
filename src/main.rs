//! # SwadOnTime demo
//!
//! Seeds the storefront, then walks one customer order from cart to pickup
//! while the vendor side imports a menu and watches the dashboard.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo run -- --config swad.json --tax-rate 0.12
//! ```

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use swad_framework::tracing::setup_tracing;
use swadontime::config::Settings;
use swadontime::dashboard::OrderFilter;
use swadontime::fixtures;
use swadontime::lifecycle::OrderSystem;
use swadontime::menu_import::parse_drafts;
use swadontime::model::{ItemId, MenuFilter, PaymentMethod};
use swadontime::status::OrderStatus;
use swadontime::tracking::TrackingOutcome;
use tracing::{info, warn, Instrument};

#[derive(Debug, Parser)]
#[command(name = "swadontime", about = "Food ordering core demo")]
struct Cli {
    /// JSON settings file. Without one the demo runs on a fast clock.
    #[arg(long, env = "SWAD_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "SWAD_DELIVERY_FEE")]
    delivery_fee: Option<u64>,

    /// Fraction between 0 and 1, e.g. 0.05.
    #[arg(long, env = "SWAD_TAX_RATE")]
    tax_rate: Option<f64>,

    /// Tracking tick in milliseconds.
    #[arg(long, env = "SWAD_TICK_MS")]
    tick_ms: Option<u64>,
}

fn load_settings(cli: &Cli) -> Result<Settings, Box<dyn Error>> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => {
            let mut settings = Settings::default();
            // A 15 minute estimate plays out in about three seconds.
            settings.tracking.minute_ms = 200;
            settings.tracking.tick_ms = 50;
            settings.tracking.queue_step_ticks = 20;
            settings
        }
    };
    Ok(settings.with_overrides(cli.delivery_fee, cli.tax_rate, cli.tick_ms)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    info!("Starting SwadOnTime");
    let system = OrderSystem::new(settings);

    let span = tracing::info_span!("seeding");
    let vendor_ids = async {
        let mut ids = Vec::new();
        for vendor in fixtures::vendors() {
            ids.push(system.catalog_client.register_vendor(vendor).await?);
        }
        Ok::<_, Box<dyn Error>>(ids)
    }
    .instrument(span)
    .await?;
    let (spice_delight, momo_house) = (vendor_ids[0], vendor_ids[1]);

    // Vendor: import an extracted menu for Momo House.
    let span = tracing::info_span!("menu_import", vendor_id = %momo_house);
    async {
        let items = parse_drafts(&fixtures::extracted_menu())?;
        let added = system.catalog_client.import_items(momo_house, items).await?;
        info!(count = added.len(), "Menu imported");
        Ok::<_, Box<dyn Error>>(())
    }
    .instrument(span)
    .await?;

    // Customer: fill a cart and check out.
    let mut customer = system.customer_session();
    let span = tracing::info_span!("checkout", vendor_id = %spice_delight);
    let order = async {
        let vendor = customer.open_menu(spice_delight).await?;
        let recommended = customer.browse(&MenuFilter::recommended()).await?;
        info!(vendor = %vendor.name, recommended = recommended.len(), "Menu opened");

        let momos = ItemId::from("item1");
        customer.add_item(&momos).await?;
        customer.add_item(&momos).await?;
        customer.add_item(&ItemId::from("item7")).await?;
        let totals = customer.totals()?;
        info!(
            subtotal = totals.subtotal,
            taxes = totals.taxes,
            total = totals.total,
            "Cart ready"
        );
        Ok::<_, Box<dyn Error>>(customer.checkout(PaymentMethod::Upi).await?)
    }
    .instrument(span)
    .await?;

    // Customer: watch progress while the scheduler moves the order along.
    let span = tracing::info_span!("tracking", order_id = %order.id);
    let outcome = async {
        let mut subscription = customer.track(order.id).await?;
        let tracking = system.track(order.id);
        let watcher = tokio::spawn(async move {
            let mut last = None;
            while let Some(snapshot) = subscription.next().await {
                if last != Some(snapshot.status) {
                    info!(
                        stage = snapshot.status.customer_stage().label(),
                        eta = snapshot.estimated_minutes,
                        queue = snapshot.queue_position,
                        "Order update"
                    );
                    last = Some(snapshot.status);
                }
            }
        });
        let outcome = tracking.join().await?;
        Ok::<_, Box<dyn Error>>((outcome, watcher))
    }
    .instrument(span)
    .await;
    let (outcome, watcher) = outcome?;

    // Vendor: hand the order over.
    let dashboard = system.vendor_dashboard(spice_delight);
    let span = tracing::info_span!("dashboard", vendor_id = %spice_delight);
    let final_order = async {
        match outcome {
            TrackingOutcome::Ready(_) => {
                let ready = dashboard
                    .orders(OrderFilter::Status(OrderStatus::Ready))
                    .await?;
                info!(ready = ready.len(), "Orders waiting for pickup");
                Ok::<_, Box<dyn Error>>(Some(dashboard.complete(order.id).await?))
            }
            other => {
                warn!(?other, "Order did not reach pickup");
                Ok(None)
            }
        }
    }
    .instrument(span)
    .await?;
    if final_order.is_some() {
        watcher.await?;
    } else {
        watcher.abort();
    }

    let stats = dashboard.stats().await?;
    info!(
        total = stats.total_orders,
        pending = stats.pending_orders,
        active = stats.active_orders,
        revenue = stats.revenue,
        "Dashboard"
    );
    if let Some(final_order) = final_order {
        println!("{}", serde_json::to_string_pretty(&final_order)?);
    }

    drop(customer);
    drop(dashboard);
    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
