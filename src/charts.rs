//! Chart data preparers: pure transforms from the immutable dataset and the
//! current selection to the exact value sets the presentation layer plots.
//! Every payload here is a serde type crossing the JSON boundary.

use crate::aggregate::{self, GroupKey, Metric};
use crate::config::ChartsConfig;
use crate::regions;
use crate::selection::SelectionState;
use crate::types::Dataset;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize)]
pub struct BarChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Top-N ranking of one metric per group.
pub fn top_bar(dataset: &Dataset, group: GroupKey, metric: Metric, n: usize) -> BarChart {
    let ranked = aggregate::top_by_metric(&dataset.records, group, metric, n);
    let (labels, values) = ranked.into_iter().unzip();
    BarChart { labels, values }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub town: String,
    pub tourism_index: f64,
}

/// Towns inside the selected index range, in dataset order.
pub fn index_scatter(dataset: &Dataset, selection: &SelectionState) -> Vec<ScatterPoint> {
    let (min, max) = selection.index_range();
    aggregate::filter(&dataset.records, |r| {
        r.tourism_index >= min && r.tourism_index <= max
    })
    .into_iter()
    .map(|r| ScatterPoint {
        town: r.town,
        tourism_index: r.tourism_index,
    })
    .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

/// Distribution of the restaurant-existence column, optionally restricted to
/// towns with at least one hotel. With exactly two observed categories the
/// slices are relabeled for display, in value-count order; any other
/// cardinality keeps the raw labels.
pub fn restaurant_pie(dataset: &Dataset, only_with_hotels: bool) -> Vec<PieSlice> {
    let counts = if only_with_hotels {
        let subset = aggregate::filter(&dataset.records, |r| r.hotels > 0);
        aggregate::value_counts(&subset, |r| &r.has_restaurants)
    } else {
        aggregate::value_counts(&dataset.records, |r| &r.has_restaurants)
    };

    if counts.len() == 2 {
        let display = ["No Restaurants", "Has Restaurants"];
        counts
            .into_iter()
            .zip(display)
            .map(|((_, count), label)| PieSlice {
                label: label.to_string(),
                count,
            })
            .collect()
    } else {
        counts
            .into_iter()
            .map(|(label, count)| PieSlice { label, count })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BubblePoint {
    pub town: String,
    pub region: String,
    pub tourism_index: f64,
    pub hotels: u32,
    pub restaurants: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BubbleInsight {
    pub mean_tourism_index: f64,
    pub mean_hotels: f64,
    pub top_town: String,
    pub top_town_hotels: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BubbleChart {
    pub points: Vec<BubblePoint>,
    /// `None` when no town survives the filters; the presentation layer
    /// shows its no-data state instead of an insight computed over nothing.
    pub insight: Option<BubbleInsight>,
}

/// Tourism index vs hotels, bubble size from restaurants, colored by region.
/// Keeps the selected regions only and drops towns with neither hotels nor
/// restaurants.
pub fn bubble_chart(dataset: &Dataset, selection: &SelectionState) -> BubbleChart {
    let subset = aggregate::filter(&dataset.records, |r| {
        selection.region_selected(&r.region) && (r.hotels > 0 || r.restaurants > 0)
    });

    let insight = match (
        aggregate::summary_stats(&subset, Metric::TourismIndex),
        aggregate::summary_stats(&subset, Metric::Hotels),
    ) {
        (Some(index), Some(hotels)) => Some(BubbleInsight {
            mean_tourism_index: index.mean,
            mean_hotels: hotels.mean,
            top_town: subset[hotels.argmax].town.clone(),
            top_town_hotels: hotels.max,
        }),
        _ => None,
    };

    let points = subset
        .into_iter()
        .map(|r| BubblePoint {
            town: r.town,
            region: r.region,
            tourism_index: r.tourism_index,
            hotels: r.hotels,
            restaurants: r.restaurants,
        })
        .collect();

    BubbleChart { points, insight }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoPoint {
    pub town: String,
    pub region: String,
    pub lat: f64,
    pub lon: f64,
    pub hotels: u32,
    pub tourism_index: f64,
}

/// Selection-filtered towns placed at their region's coordinates. Towns in a
/// region with no coordinate entry are dropped here and only here.
pub fn geo_chart(dataset: &Dataset, selection: &SelectionState) -> Vec<GeoPoint> {
    dataset
        .records
        .iter()
        .filter(|r| selection.matches(r))
        .filter_map(|r| {
            regions::coordinates_for(&r.region).map(|point| GeoPoint {
                town: r.town.clone(),
                region: r.region.clone(),
                lat: point.y(),
                lon: point.x(),
                hotels: r.hotels,
                tourism_index: r.tourism_index,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct TreemapCell {
    pub region: String,
    pub hotels: f64,
    pub restaurants: f64,
}

/// Per-region hotel and restaurant totals over the full dataset.
pub fn region_treemap(dataset: &Dataset) -> Vec<TreemapCell> {
    aggregate::sum_by_group(
        &dataset.records,
        GroupKey::Region,
        &[Metric::Hotels, Metric::Restaurants],
    )
    .into_iter()
    .map(|g| TreemapCell {
        region: g.group,
        hotels: g.sums[0],
        restaurants: g.sums[1],
    })
    .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct Kpis {
    pub selected_towns: usize,
    /// `None` when the current selection matches nothing.
    pub mean_tourism_index: Option<f64>,
    pub total_hotels: f64,
    pub total_restaurants: f64,
}

/// Headline scalars over the selection-filtered view.
pub fn kpis(dataset: &Dataset, selection: &SelectionState) -> Kpis {
    let view = aggregate::filter(&dataset.records, |r| selection.matches(r));
    let towns: BTreeSet<&str> = view.iter().map(|r| r.town.as_str()).collect();

    Kpis {
        selected_towns: towns.len(),
        mean_tourism_index: aggregate::summary_stats(&view, Metric::TourismIndex)
            .map(|stats| stats.mean),
        total_hotels: view.iter().map(|r| Metric::Hotels.of(r)).sum(),
        total_restaurants: view.iter().map(|r| Metric::Restaurants.of(r)).sum(),
    }
}

/// Everything one render pass hands to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub kpis: Kpis,
    pub top_towns: BarChart,
    pub index_scatter: Vec<ScatterPoint>,
    pub restaurant_pie: Vec<PieSlice>,
    pub bubble: BubbleChart,
    pub geo: Vec<GeoPoint>,
    pub treemap: Vec<TreemapCell>,
}

pub fn render_dashboard(
    dataset: &Dataset,
    selection: &SelectionState,
    charts: &ChartsConfig,
) -> DashboardData {
    DashboardData {
        kpis: kpis(dataset, selection),
        top_towns: top_bar(dataset, GroupKey::Town, Metric::Hotels, charts.top_n),
        index_scatter: index_scatter(dataset, selection),
        restaurant_pie: restaurant_pie(dataset, charts.only_with_hotels),
        bubble: bubble_chart(dataset, selection),
        geo: geo_chart(dataset, selection),
        treemap: region_treemap(dataset),
    }
}
