use serde::Deserialize;

use crate::error::ConfigError;
use crate::pricing::engine::{AreaBounds, PricingEngine};
use crate::pricing::table::{AreaHintTable, PriceTable, PriceZone};

const SITE_CONFIG: &str = include_str!("../config/site.json");

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ModalTiming {
    pub close_delay_ms: u32,
    pub reload_delay_ms: u32,
}

impl Default for ModalTiming {
    fn default() -> Self {
        Self {
            close_delay_ms: 2500,
            reload_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FadeInOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for FadeInOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

/// Everything tunable about the page. Baked into the binary from
/// `config/site.json`; any field left out of the file takes its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub prices: PriceTable,
    pub area_hints: AreaHintTable,
    pub area: AreaBounds,
    pub visits_per_month: u32,
    pub header_scroll_threshold: f64,
    pub modal: ModalTiming,
    pub fade_in: FadeInOptions,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            prices: PriceTable::default(),
            area_hints: AreaHintTable::default(),
            area: AreaBounds::default(),
            visits_per_month: 4,
            header_scroll_threshold: 50.0,
            modal: ModalTiming::default(),
            fade_in: FadeInOptions::default(),
        }
    }
}

impl SiteConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(SITE_CONFIG)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let AreaBounds { min, max, default } = self.area;
        let (zone_min, zone_max) = PriceZone::domain();
        if min < zone_min || max > zone_max || min >= max || default < min || default > max {
            return Err(ConfigError::InvalidBounds { min, max, default });
        }
        if self.visits_per_month == 0 {
            return Err(ConfigError::ZeroVisits);
        }
        Ok(())
    }

    pub fn pricing_engine(&self) -> PricingEngine {
        PricingEngine::new(
            self.prices.clone(),
            self.area_hints.clone(),
            self.area,
            self.visits_per_month,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::table::Frequency;

    #[test]
    fn embedded_config_matches_defaults() {
        let config = SiteConfig::load().expect("embedded config should be valid");
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = SiteConfig::from_json(r#"{ "visits_per_month": 5 }"#).unwrap();
        assert_eq!(config.visits_per_month, 5);
        assert_eq!(config.modal, ModalTiming::default());
        assert_eq!(
            config.pricing_engine().monthly_equivalent(Some(100), Frequency::Weekly),
            Some(500)
        );
    }

    #[test]
    fn rejects_inverted_prices() {
        let raw = r#"{
            "prices": {
                "zone1": { "single": 100, "weekly": 200 },
                "zone2": { "single": 100, "weekly": 50 },
                "zone3": { "single": 100, "weekly": 50 }
            }
        }"#;
        let err = SiteConfig::from_json(raw).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("zone1"));
    }

    #[test]
    fn rejects_bad_bounds_and_zero_visits() {
        let err = SiteConfig::from_json(r#"{ "area": { "min": 250, "max": 50, "default": 70 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds { .. }));

        let err = SiteConfig::from_json(r#"{ "visits_per_month": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroVisits));
    }

    #[test]
    fn slider_bounds_must_stay_inside_priced_zones() {
        let err = SiteConfig::from_json(r#"{ "area": { "min": 10, "max": 400, "default": 20 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidBounds { min: 10, max: 400, default: 20 }
        ));

        let err = SiteConfig::from_json(r#"{ "area": { "min": 50, "max": 251, "default": 70 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds { .. }));

        let config = SiteConfig::from_json(r#"{ "area": { "min": 60, "max": 200, "default": 100 } }"#)
            .unwrap();
        assert_eq!(config.pricing_engine().classify_zone(400), PriceZone::Zone3);
        assert_eq!(config.pricing_engine().classify_zone(10), PriceZone::Zone1);
    }

    #[test]
    fn repeated_hint_threshold_fails_to_load() {
        let err = SiteConfig::from_json(r#"{ "area_hints": { "50": "a", "50": "b" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
