use thiserror::Error;

use crate::pricing::table::PriceZone;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("price table has no entry for {0}")]
    MissingZone(PriceZone),
    #[error("weekly price {weekly} is above the single price {single} in {zone}")]
    DiscountInverted {
        zone: PriceZone,
        single: u32,
        weekly: u32,
    },
    #[error("area hint table is empty")]
    EmptyHintTable,
    #[error("area hint threshold {0} is listed more than once")]
    DuplicateHint(u32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse site config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("area bounds {min}..={max} (default {default}) are not a valid slider range within the priced zones")]
    InvalidBounds { min: u32, max: u32, default: u32 },
    #[error("visits per month must be at least 1")]
    ZeroVisits,
}

/// Validation failures of the lead form. The messages are shown to the visitor.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Пожалуйста, укажите имя")]
    MissingName,
    #[error("Пожалуйста, укажите телефон")]
    MissingPhone,
    #[error("Пожалуйста, заполните имя и телефон")]
    MissingNameAndPhone,
}
