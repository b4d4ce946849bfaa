use crate::types::{Dataset, TownRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Session-scoped filter state: which towns and regions are chosen and the
/// inclusive tourism-index range. Created all-selected over the loaded
/// dataset, mutated only by explicit user actions, and passed explicitly to
/// every render pass instead of living as an ambient global.
#[derive(Debug, Clone)]
pub struct SelectionState {
    towns: BTreeSet<String>,
    regions: BTreeSet<String>,
    index_range: (f64, f64),
    town_universe: BTreeSet<String>,
    region_universe: BTreeSet<String>,
    index_bounds: (f64, f64),
}

/// One mutation event from the presentation layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SelectionAction {
    ToggleTown { town: String },
    ToggleRegion { region: String },
    SelectAllTowns,
    ClearTowns,
    SelectAllRegions,
    ClearRegions,
    SetIndexRange { min: f64, max: f64 },
}

/// Serializable view of the current selection, including the universes the
/// presentation layer needs to draw its checkbox grids and range slider.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionSnapshot {
    pub towns: Vec<String>,
    pub regions: Vec<String>,
    pub index_range: (f64, f64),
    pub available_towns: Vec<String>,
    pub available_regions: Vec<String>,
    pub index_bounds: (f64, f64),
}

impl SelectionState {
    /// Fresh session state: every town and region selected, full observed
    /// index range. The dataset is the universe for the whole session.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let town_universe: BTreeSet<String> = dataset.towns().into_iter().collect();
        let region_universe: BTreeSet<String> = dataset.regions().into_iter().collect();
        let index_bounds = dataset.index_bounds();
        Self {
            towns: town_universe.clone(),
            regions: region_universe.clone(),
            index_range: index_bounds,
            town_universe,
            region_universe,
            index_bounds,
        }
    }

    pub fn toggle_town(&mut self, town: &str) {
        if !self.towns.remove(town) {
            self.towns.insert(town.to_string());
        }
    }

    pub fn toggle_region(&mut self, region: &str) {
        if !self.regions.remove(region) {
            self.regions.insert(region.to_string());
        }
    }

    pub fn select_all_towns(&mut self) {
        self.towns = self.town_universe.clone();
    }

    pub fn clear_towns(&mut self) {
        self.towns.clear();
    }

    pub fn select_all_regions(&mut self) {
        self.regions = self.region_universe.clone();
    }

    pub fn clear_regions(&mut self) {
        self.regions.clear();
    }

    /// Clamps both ends to the bounds observed at load time; no further
    /// validation.
    pub fn set_index_range(&mut self, min: f64, max: f64) {
        let (low, high) = self.index_bounds;
        self.index_range = (min.max(low), max.min(high));
    }

    pub fn index_range(&self) -> (f64, f64) {
        self.index_range
    }

    pub fn town_selected(&self, town: &str) -> bool {
        self.towns.contains(town)
    }

    pub fn region_selected(&self, region: &str) -> bool {
        self.regions.contains(region)
    }

    /// The AND of town membership, region membership and index range.
    pub fn matches(&self, record: &TownRecord) -> bool {
        self.towns.contains(&record.town)
            && self.regions.contains(&record.region)
            && record.tourism_index >= self.index_range.0
            && record.tourism_index <= self.index_range.1
    }

    pub fn apply(&mut self, action: SelectionAction) {
        match action {
            SelectionAction::ToggleTown { town } => self.toggle_town(&town),
            SelectionAction::ToggleRegion { region } => self.toggle_region(&region),
            SelectionAction::SelectAllTowns => self.select_all_towns(),
            SelectionAction::ClearTowns => self.clear_towns(),
            SelectionAction::SelectAllRegions => self.select_all_regions(),
            SelectionAction::ClearRegions => self.clear_regions(),
            SelectionAction::SetIndexRange { min, max } => self.set_index_range(min, max),
        }
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            towns: self.towns.iter().cloned().collect(),
            regions: self.regions.iter().cloned().collect(),
            index_range: self.index_range,
            available_towns: self.town_universe.iter().cloned().collect(),
            available_regions: self.region_universe.iter().cloned().collect(),
            index_bounds: self.index_bounds,
        }
    }
}
