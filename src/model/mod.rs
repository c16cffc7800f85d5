//! Domain types shared by the actors, the cart ledger and the session layers.

pub mod ids;
pub mod menu;
pub mod order;
pub mod vendor;

pub use ids::*;
pub use menu::*;
pub use order::*;
pub use vendor::*;
