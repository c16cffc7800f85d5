//! Runtime settings.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! gives the stock configuration: delivery fee 20, 5% tax, a 15 minute
//! estimate with three orders ahead.

use crate::ledger::{InvalidTaxRate, PricingConfig, TaxRate};
use crate::status::ProgressPlan;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidTaxRate(#[from] InvalidTaxRate),

    #[error("channel_capacity must be at least 1")]
    ZeroChannelCapacity,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pricing: PricingConfig,
    pub tracking: TrackingSettings,
    /// Mailbox size for each actor. Must be at least 1.
    pub channel_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            tracking: TrackingSettings::default(),
            channel_capacity: 32,
        }
    }
}

/// Values an order starts with, and how fast the tracking clock runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackingSettings {
    pub estimated_minutes: u32,
    pub initial_queue_position: u32,
    /// Scheduler tick.
    pub tick_ms: u64,
    /// Length of one ETA minute. 60000 in production.
    pub minute_ms: u64,
    /// Ticks between queue position steps.
    pub queue_step_ticks: u64,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            estimated_minutes: 15,
            initial_queue_position: 3,
            tick_ms: 1_000,
            minute_ms: 60_000,
            queue_step_ticks: 60,
        }
    }
}

impl TrackingSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn plan(&self) -> ProgressPlan {
        ProgressPlan::new(self.estimated_minutes, Duration::from_millis(self.minute_ms))
    }
}

impl Settings {
    /// Reads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(raw)?;
        if settings.channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        Ok(settings)
    }

    /// `channel_capacity`, raised to 1 for settings built in code.
    pub fn mailbox_size(&self) -> usize {
        self.channel_capacity.max(1)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        delivery_fee: Option<u64>,
        tax_rate: Option<f64>,
        tick_ms: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(fee) = delivery_fee {
            self.pricing.delivery_fee = fee;
        }
        if let Some(rate) = tax_rate {
            self.pricing.tax_rate = TaxRate::from_fraction(rate)?;
        }
        if let Some(tick_ms) = tick_ms {
            self.tracking.tick_ms = tick_ms;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.pricing.delivery_fee, 20);
        assert_eq!(settings.pricing.tax_rate.basis_points(), 500);
        assert_eq!(settings.tracking.estimated_minutes, 15);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let settings = Settings::from_json(
            r#"{ "pricing": { "tax_rate": 0.12 }, "tracking": { "minute_ms": 100 } }"#,
        )
        .unwrap();
        assert_eq!(settings.pricing.delivery_fee, 20);
        assert_eq!(settings.pricing.tax_rate.basis_points(), 1200);
        assert_eq!(settings.tracking.plan().total(), Duration::from_millis(1_500));
        assert_eq!(settings.channel_capacity, 32);
    }

    #[test]
    fn out_of_range_tax_rate_is_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "pricing": { "tax_rate": 1.5 } }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::default().with_overrides(None, Some(-0.1), None),
            Err(ConfigError::InvalidTaxRate(_))
        ));
    }

    #[test]
    fn zero_channel_capacity_is_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "channel_capacity": 0 }"#),
            Err(ConfigError::ZeroChannelCapacity)
        ));
        assert_eq!(Settings::from_json(r#"{ "channel_capacity": 1 }"#).unwrap().mailbox_size(), 1);

        let built = Settings {
            channel_capacity: 0,
            ..Settings::default()
        };
        assert_eq!(built.mailbox_size(), 1);
    }

    #[test]
    fn overrides_apply() {
        let settings = Settings::default()
            .with_overrides(Some(0), Some(0.18), Some(50))
            .unwrap();
        assert_eq!(settings.pricing.delivery_fee, 0);
        assert_eq!(settings.pricing.tax_rate.basis_points(), 1800);
        assert_eq!(settings.tracking.tick(), Duration::from_millis(50));
    }
}
