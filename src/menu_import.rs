//! Turning extracted menu rows into catalog items.
//!
//! Rows arrive as loose text (an extraction step reads them off a photo of a
//! printed menu); nothing here does the extraction. Validation is strict and
//! stops at the first bad row so the vendor can fix it before anything is
//! imported.

use crate::model::{NewMenuItem, MAX_PRICE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row as the vendor reviews it. `price` is kept as text until parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDraft {
    pub name: String,
    pub price: String,
    pub category: String,
    pub is_veg: bool,
    #[serde(default)]
    pub description: String,
}

impl MenuDraft {
    pub fn new(name: &str, price: &str, category: &str, is_veg: bool) -> Self {
        Self {
            name: name.to_string(),
            price: price.to_string(),
            category: category.to_string(),
            is_veg,
            description: String::new(),
        }
    }
}

/// Rows are numbered from 1.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("Row {row}: name is empty")]
    EmptyName { row: usize },

    #[error("Row {row}: price {value:?} is not a whole amount between 0 and {}", MAX_PRICE)]
    InvalidPrice { row: usize, value: String },

    #[error("Row {row}: category is empty")]
    EmptyCategory { row: usize },
}

pub fn parse_drafts(drafts: &[MenuDraft]) -> Result<Vec<NewMenuItem>, ImportError> {
    drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| parse_draft(index + 1, draft))
        .collect()
}

fn parse_draft(row: usize, draft: &MenuDraft) -> Result<NewMenuItem, ImportError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ImportError::EmptyName { row });
    }
    let price = draft
        .price
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|price| *price <= MAX_PRICE)
        .ok_or_else(|| ImportError::InvalidPrice {
            row,
            value: draft.price.clone(),
        })?;
    let category = draft.category.trim();
    if category.is_empty() {
        return Err(ImportError::EmptyCategory { row });
    }

    let mut item = NewMenuItem::new(name, price, category).with_description(draft.description.trim());
    if !draft.is_veg {
        item = item.non_veg();
    }
    Ok(item)
}
