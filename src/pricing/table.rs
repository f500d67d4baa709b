use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::PricingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceZone {
    Zone1,
    Zone2,
    Zone3,
}

impl PriceZone {
    pub const ALL: [PriceZone; 3] = [PriceZone::Zone1, PriceZone::Zone2, PriceZone::Zone3];

    /// Inclusive area range in square meters covered by the zone.
    pub fn range(self) -> (u32, u32) {
        match self {
            PriceZone::Zone1 => (50, 90),
            PriceZone::Zone2 => (91, 150),
            PriceZone::Zone3 => (151, 250),
        }
    }

    /// Inclusive area range covered by all zones together.
    pub fn domain() -> (u32, u32) {
        (PriceZone::Zone1.range().0, PriceZone::Zone3.range().1)
    }
}

impl fmt::Display for PriceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceZone::Zone1 => write!(f, "zone1"),
            PriceZone::Zone2 => write!(f, "zone2"),
            PriceZone::Zone3 => write!(f, "zone3"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Single,
    Weekly,
}

impl Frequency {
    pub const ALL: [Frequency; 2] = [Frequency::Single, Frequency::Weekly];

    /// Value of the radio input carrying this choice.
    pub fn value(self) -> &'static str {
        match self {
            Frequency::Single => "single",
            Frequency::Weekly => "weekly",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "single" => Some(Frequency::Single),
            "weekly" => Some(Frequency::Weekly),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Single => "разовая уборка",
            Frequency::Weekly => "регулярно раз в неделю",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Frequency::Single => "Разовая",
            Frequency::Weekly => "Раз в неделю",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PriceEntry {
    pub single: u32,
    pub weekly: u32,
}

impl PriceEntry {
    pub fn price(&self, frequency: Frequency) -> u32 {
        match frequency {
            Frequency::Single => self.single,
            Frequency::Weekly => self.weekly,
        }
    }
}

/// Zone to price mapping. Construction checks that every zone is present and
/// that the weekly rate never exceeds the single-visit rate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<PriceZone, PriceEntry>")]
pub struct PriceTable {
    entries: BTreeMap<PriceZone, PriceEntry>,
}

impl PriceTable {
    pub fn new(entries: BTreeMap<PriceZone, PriceEntry>) -> Result<Self, PricingError> {
        for zone in PriceZone::ALL {
            let entry = entries.get(&zone).ok_or(PricingError::MissingZone(zone))?;
            if entry.weekly > entry.single {
                return Err(PricingError::DiscountInverted {
                    zone,
                    single: entry.single,
                    weekly: entry.weekly,
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn entry(&self, zone: PriceZone) -> PriceEntry {
        // new() guarantees all zones are present
        self.entries[&zone]
    }
}

impl TryFrom<BTreeMap<PriceZone, PriceEntry>> for PriceTable {
    type Error = PricingError;

    fn try_from(entries: BTreeMap<PriceZone, PriceEntry>) -> Result<Self, Self::Error> {
        PriceTable::new(entries)
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            entries: BTreeMap::from([
                (PriceZone::Zone1, PriceEntry { single: 4900, weekly: 3900 }),
                (PriceZone::Zone2, PriceEntry { single: 6900, weekly: 5500 }),
                (PriceZone::Zone3, PriceEntry { single: 9900, weekly: 7900 }),
            ]),
        }
    }
}

/// Minimum area threshold to a "rooms · crew" label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "HintEntries")]
pub struct AreaHintTable {
    hints: BTreeMap<u32, String>,
}

impl AreaHintTable {
    pub fn new(hints: BTreeMap<u32, String>) -> Result<Self, PricingError> {
        if hints.is_empty() {
            return Err(PricingError::EmptyHintTable);
        }
        Ok(Self { hints })
    }

    /// Label of the greatest threshold not above `area`. Areas below every
    /// threshold get the smallest threshold's label.
    pub fn lookup(&self, area: u32) -> &str {
        self.hints
            .range(..=area)
            .next_back()
            .or_else(|| self.hints.iter().next())
            .map(|(_, label)| label.as_str())
            .unwrap_or_default()
    }
}

/// Hint thresholds in file order. A JSON object read straight into a map
/// would keep only the last of two equal keys.
pub struct HintEntries(Vec<(u32, String)>);

impl<'de> Deserialize<'de> for HintEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = HintEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of area thresholds to labels")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<u32, String>()? {
                    entries.push(entry);
                }
                Ok(HintEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl TryFrom<HintEntries> for AreaHintTable {
    type Error = PricingError;

    fn try_from(HintEntries(entries): HintEntries) -> Result<Self, Self::Error> {
        let mut hints = BTreeMap::new();
        for (threshold, label) in entries {
            if hints.insert(threshold, label).is_some() {
                return Err(PricingError::DuplicateHint(threshold));
            }
        }
        AreaHintTable::new(hints)
    }
}

impl Default for AreaHintTable {
    fn default() -> Self {
        let hints = [
            (50, "1–2 комнаты · 1 клинер"),
            (70, "2 комнаты · 1 клинер"),
            (90, "2–3 комнаты · 2 клинера"),
            (120, "3 комнаты · 2 клинера"),
            (150, "3–4 комнаты · 2 клинера"),
            (200, "4+ комнат · 3 клинера"),
        ];
        Self {
            hints: hints
                .into_iter()
                .map(|(area, label)| (area, label.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_ranges_partition_slider_domain() {
        let mut expected_start = 50;
        for zone in PriceZone::ALL {
            let (start, end) = zone.range();
            assert_eq!(start, expected_start, "gap or overlap before {}", zone);
            assert!(end >= start);
            expected_start = end + 1;
        }
        assert_eq!(expected_start, 251);
    }

    #[test]
    fn rejects_inverted_discount() {
        let mut entries = BTreeMap::new();
        entries.insert(PriceZone::Zone1, PriceEntry { single: 100, weekly: 90 });
        entries.insert(PriceZone::Zone2, PriceEntry { single: 100, weekly: 120 });
        entries.insert(PriceZone::Zone3, PriceEntry { single: 100, weekly: 100 });

        let err = PriceTable::new(entries).unwrap_err();
        assert_eq!(
            err,
            PricingError::DiscountInverted {
                zone: PriceZone::Zone2,
                single: 100,
                weekly: 120
            }
        );
    }

    #[test]
    fn rejects_missing_zone() {
        let mut entries = BTreeMap::new();
        entries.insert(PriceZone::Zone1, PriceEntry { single: 100, weekly: 90 });
        entries.insert(PriceZone::Zone3, PriceEntry { single: 100, weekly: 90 });

        assert_eq!(
            PriceTable::new(entries).unwrap_err(),
            PricingError::MissingZone(PriceZone::Zone2)
        );
    }

    #[test]
    fn hint_table_must_not_be_empty() {
        assert_eq!(
            AreaHintTable::new(BTreeMap::new()).unwrap_err(),
            PricingError::EmptyHintTable
        );
    }

    #[test]
    fn repeated_hint_threshold_is_rejected() {
        let err = serde_json::from_str::<AreaHintTable>(r#"{ "50": "a", "50": "b" }"#).unwrap_err();
        assert!(err.to_string().contains("threshold 50"));

        let table: AreaHintTable = serde_json::from_str(r#"{ "90": "c", "50": "a" }"#).unwrap();
        assert_eq!(table.lookup(60), "a");
        assert_eq!(table.lookup(95), "c");
    }

    #[test]
    fn zone_domain_spans_all_zones() {
        assert_eq!(PriceZone::domain(), (50, 250));
    }

    #[test]
    fn frequency_round_trips_through_radio_value() {
        for frequency in Frequency::ALL {
            assert_eq!(Frequency::from_value(frequency.value()), Some(frequency));
        }
        assert_eq!(Frequency::from_value("monthly"), None);
    }
}
