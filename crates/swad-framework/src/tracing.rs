//! # Observability & Tracing
//!
//! Every actor logs with `tracing` using structured fields: `entity_type` on
//! each line, `%id` for the entity involved, `?params`/`?action` at debug
//! level. Clients add `#[instrument]` spans so a request can be followed from
//! the caller into the actor.
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle and state changes
//! RUST_LOG=debug cargo run     # payloads and reads
//! RUST_LOG=swadontime::tracking=trace cargo run
//! ```
//!
//! With `RUST_LOG=info` an order placement reads roughly:
//!
//! ```text
//! INFO checkout: Placing order vendor_id=vendor_1 lines=2
//! INFO Created entity_type="Order" id=ORD12345 size=1
//! INFO Action ok entity_type="Order" id=ORD12345
//! ```

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Installs the global compact subscriber.
///
/// Module paths are hidden (`with_target(false)`); actors identify themselves
/// through the `entity_type` field instead. Calling this twice is harmless:
/// the second installation is ignored.
pub fn setup_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
