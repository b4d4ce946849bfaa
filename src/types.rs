use serde::Serialize;
use std::collections::BTreeSet;

/// One row of the source table. The region is already cleaned to the
/// suffix after the last `/` of the raw refArea value.
#[derive(Debug, Clone, Serialize)]
pub struct TownRecord {
    pub town: String,
    pub region: String,
    pub tourism_index: f64,
    pub hotels: u32,
    pub restaurants: u32,
    // Boolean-like categorical kept verbatim; no fixed encoding is enforced.
    pub has_restaurants: String,
}

/// The full table, loaded once at startup. Immutable after load: every
/// downstream component derives new views instead of mutating records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<TownRecord>,
}

impl Dataset {
    pub fn new(records: Vec<TownRecord>) -> Self {
        Self { records }
    }

    /// Distinct town names in first-seen order.
    pub fn towns(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut towns = Vec::new();
        for record in &self.records {
            if seen.insert(record.town.as_str()) {
                towns.push(record.town.clone());
            }
        }
        towns
    }

    /// Distinct region names, sorted.
    pub fn regions(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.region.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Observed (min, max) of the tourism index; (0.0, 0.0) for an empty table.
    pub fn index_bounds(&self) -> (f64, f64) {
        let mut bounds: Option<(f64, f64)> = None;
        for record in &self.records {
            let value = record.tourism_index;
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }
        bounds.unwrap_or((0.0, 0.0))
    }
}
