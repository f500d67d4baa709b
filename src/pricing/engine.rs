use serde::Deserialize;

use crate::pricing::table::{AreaHintTable, Frequency, PriceTable, PriceZone};

pub const ON_REQUEST: &str = "По запросу";
pub const CURRENCY_SUFFIX: &str = "₽";
const GROUP_SEPARATOR: char = '\u{a0}';

/// Slider range of the calculator, in square meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AreaBounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl AreaBounds {
    pub fn clamp(&self, area: u32) -> u32 {
        area.clamp(self.min, self.max)
    }

    /// Position of `area` along the slider track, 0.0 ..= 100.0.
    pub fn fill_percent(&self, area: u32) -> f64 {
        let span = self.max.saturating_sub(self.min);
        if span == 0 {
            return 0.0;
        }
        f64::from(self.clamp(area) - self.min) / f64::from(span) * 100.0
    }
}

impl Default for AreaBounds {
    fn default() -> Self {
        Self {
            min: 50,
            max: 250,
            default: 70,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingEngine {
    prices: PriceTable,
    hints: AreaHintTable,
    bounds: AreaBounds,
    visits_per_month: u32,
}

impl PricingEngine {
    pub fn new(
        prices: PriceTable,
        hints: AreaHintTable,
        bounds: AreaBounds,
        visits_per_month: u32,
    ) -> Self {
        Self {
            prices,
            hints,
            bounds,
            visits_per_month,
        }
    }

    pub fn bounds(&self) -> AreaBounds {
        self.bounds
    }

    /// Areas outside the slider range are clamped before classification, and
    /// never beyond the priced zones.
    pub fn classify_zone(&self, area: u32) -> PriceZone {
        let (zone_min, zone_max) = PriceZone::domain();
        let area = self.bounds.clamp(area).clamp(zone_min, zone_max);
        PriceZone::ALL
            .into_iter()
            .find(|zone| area <= zone.range().1)
            .unwrap_or(PriceZone::Zone3)
    }

    pub fn lookup_price(&self, area: u32, frequency: Frequency) -> u32 {
        self.prices.entry(self.classify_zone(area)).price(frequency)
    }

    /// Monthly cost of a plan; weekly plans are billed for a fixed number of
    /// visits per month. `None` when the price is unknown.
    pub fn monthly_equivalent(&self, price: Option<u32>, frequency: Frequency) -> Option<u32> {
        let price = price.filter(|p| *p > 0)?;
        match frequency {
            Frequency::Single => Some(price),
            Frequency::Weekly => Some(price.saturating_mul(self.visits_per_month)),
        }
    }

    /// Saving per visit compared to a single cleaning. Signed: a table with
    /// weekly above single would show up as a negative saving.
    pub fn savings(&self, area: u32, frequency: Frequency) -> i64 {
        match frequency {
            Frequency::Single => 0,
            _ => {
                i64::from(self.lookup_price(area, Frequency::Single))
                    - i64::from(self.lookup_price(area, frequency))
            }
        }
    }

    pub fn area_hint(&self, area: u32) -> &str {
        self.hints.lookup(area)
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(
            PriceTable::default(),
            AreaHintTable::default(),
            AreaBounds::default(),
            4,
        )
    }
}

/// Formats a price the ru-RU way: digits grouped by three with a no-break
/// space, followed by the ruble sign. Unknown or zero prices read "on request".
pub fn format_price(price: Option<u32>) -> String {
    match price {
        None | Some(0) => ON_REQUEST.to_string(),
        Some(price) => format!("{}{}{}", group_thousands(price), GROUP_SEPARATOR, CURRENCY_SUFFIX),
    }
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}
