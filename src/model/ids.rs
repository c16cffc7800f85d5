//! Identifier newtypes.
//!
//! Vendor and order ids are numeric so the actor can generate them; menu item
//! ids are strings that stay stable within one vendor's catalog.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VendorId(pub u32);

impl From<u32> for VendorId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for VendorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vendor_{}", self.0)
    }
}

/// Type-safe identifier for Orders, shown to customers as `ORD12345`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ORD{}", self.0)
    }
}

/// Identifier of a menu item within one vendor's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_the_way_customers_see_them() {
        assert_eq!(OrderId(12345).to_string(), "ORD12345");
        assert_eq!(VendorId(3).to_string(), "vendor_3");
        assert_eq!(ItemId::from("item1").to_string(), "item1");
    }
}
