use crate::types::TownRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Grouping column for aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Town,
    Region,
}

impl GroupKey {
    pub fn of<'a>(&self, record: &'a TownRecord) -> &'a str {
        match self {
            GroupKey::Town => &record.town,
            GroupKey::Region => &record.region,
        }
    }
}

/// Numeric column for aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TourismIndex,
    Hotels,
    Restaurants,
}

impl Metric {
    pub fn of(&self, record: &TownRecord) -> f64 {
        match self {
            Metric::TourismIndex => record.tourism_index,
            Metric::Hotels => f64::from(record.hotels),
            Metric::Restaurants => f64::from(record.restaurants),
        }
    }
}

/// Sums `metric` per group, ranks descending and returns the first `n`
/// entries. The sort is stable, so ties keep first-encountered group order;
/// an `n` beyond the group count returns every group.
pub fn top_by_metric(
    records: &[TownRecord],
    group: GroupKey,
    metric: Metric,
    n: usize,
) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = group.of(record);
        match positions.get(key) {
            Some(&i) => totals[i].1 += metric.of(record),
            None => {
                positions.insert(key.to_string(), totals.len());
                totals.push((key.to_string(), metric.of(record)));
            }
        }
    }

    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    totals.truncate(n);
    totals
}

/// Per-group sums of several metrics at once, one entry per distinct group
/// value in first-seen order.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSums {
    pub group: String,
    pub sums: Vec<f64>,
}

pub fn sum_by_group(records: &[TownRecord], group: GroupKey, metrics: &[Metric]) -> Vec<GroupSums> {
    let mut totals: Vec<GroupSums> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = group.of(record);
        let i = match positions.get(key) {
            Some(&i) => i,
            None => {
                positions.insert(key.to_string(), totals.len());
                totals.push(GroupSums {
                    group: key.to_string(),
                    sums: vec![0.0; metrics.len()],
                });
                totals.len() - 1
            }
        };
        for (slot, metric) in metrics.iter().enumerate() {
            totals[i].sums[slot] += metric.of(record);
        }
    }

    totals
}

/// Filters into a new owned view; the source is untouched.
pub fn filter<F>(records: &[TownRecord], predicate: F) -> Vec<TownRecord>
where
    F: Fn(&TownRecord) -> bool,
{
    records.iter().filter(|r| predicate(r)).cloned().collect()
}

/// Scalar summary of one metric over a subset. `argmax` indexes into the
/// subset the stats were computed from; ties resolve to the first record.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub sum: f64,
    pub max: f64,
    pub argmax: usize,
}

/// `None` for an empty subset. Callers branch on emptiness instead of
/// receiving NaN means or an out-of-range argmax.
pub fn summary_stats(records: &[TownRecord], metric: Metric) -> Option<SummaryStats> {
    if records.is_empty() {
        return None;
    }

    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut argmax = 0;
    for (i, record) in records.iter().enumerate() {
        let value = metric.of(record);
        sum += value;
        if value > max {
            max = value;
            argmax = i;
        }
    }

    Some(SummaryStats {
        mean: sum / records.len() as f64,
        sum,
        max,
        argmax,
    })
}

/// Observed categories of a column with their counts, ordered by count
/// descending (first-seen order between equal counts). No fixed enum is
/// enforced; the categories are whatever the data contains.
pub fn value_counts<F>(records: &[TownRecord], key: F) -> Vec<(String, usize)>
where
    F: Fn(&TownRecord) -> &str,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let category = key(record);
        match positions.get(category) {
            Some(&i) => counts[i].1 += 1,
            None => {
                positions.insert(category.to_string(), counts.len());
                counts.push((category.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(town: &str, region: &str, index: f64, hotels: u32, restaurants: u32) -> TownRecord {
        let exists = if restaurants > 0 { "1" } else { "0" };
        TownRecord {
            town: town.to_string(),
            region: region.to_string(),
            tourism_index: index,
            hotels,
            restaurants,
            has_restaurants: exists.to_string(),
        }
    }

    fn sample() -> Vec<TownRecord> {
        vec![
            record("A", "North_Governorate", 4.0, 5, 2),
            record("B", "North_Governorate", 2.0, 3, 0),
            record("C", "South_Governorate", 6.0, 5, 4),
        ]
    }

    #[test]
    fn top_by_metric_breaks_ties_by_first_seen_order() {
        let records = sample();
        let top = top_by_metric(&records, GroupKey::Town, Metric::Hotels, 2);
        assert_eq!(top, vec![("A".to_string(), 5.0), ("C".to_string(), 5.0)]);
    }

    #[test]
    fn top_by_metric_caps_at_group_count() {
        let records = sample();
        let top = top_by_metric(&records, GroupKey::Town, Metric::Hotels, 10);
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn top_by_metric_is_sorted_descending_and_bounded() {
        let records = sample();
        let top = top_by_metric(&records, GroupKey::Town, Metric::Hotels, 2);
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
        let total: f64 = records.iter().map(|r| Metric::Hotels.of(r)).sum();
        let returned: f64 = top.iter().map(|(_, v)| v).sum();
        assert!(returned <= total);
    }

    #[test]
    fn top_by_metric_sums_repeated_group_values() {
        let mut records = sample();
        records.push(record("A", "North_Governorate", 1.0, 2, 1));
        let top = top_by_metric(&records, GroupKey::Town, Metric::Hotels, 1);
        assert_eq!(top, vec![("A".to_string(), 7.0)]);
    }

    #[test]
    fn sum_by_group_totals_match_ungrouped_sums() {
        let records = sample();
        let grouped = sum_by_group(
            &records,
            GroupKey::Region,
            &[Metric::Hotels, Metric::Restaurants],
        );
        let hotels: f64 = grouped.iter().map(|g| g.sums[0]).sum();
        let restaurants: f64 = grouped.iter().map(|g| g.sums[1]).sum();
        assert_eq!(hotels, 13.0);
        assert_eq!(restaurants, 6.0);
    }

    #[test]
    fn sum_by_group_one_entry_per_distinct_group() {
        let records = sample();
        let grouped = sum_by_group(&records, GroupKey::Region, &[Metric::Hotels]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].group, "North_Governorate");
        assert_eq!(grouped[0].sums, vec![8.0]);
    }

    #[test]
    fn filter_is_idempotent() {
        let records = sample();
        let once = filter(&records, |r| r.hotels > 3);
        let twice = filter(&once, |r| r.hotels > 3);
        assert_eq!(once.len(), twice.len());
        assert!(once
            .iter()
            .zip(twice.iter())
            .all(|(a, b)| a.town == b.town && a.hotels == b.hotels));
    }

    #[test]
    fn filter_leaves_source_untouched() {
        let records = sample();
        let subset = filter(&records, |r| r.restaurants > 0);
        assert_eq!(subset.len(), 2);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn summary_stats_of_empty_subset_is_none() {
        assert!(summary_stats(&[], Metric::Hotels).is_none());
    }

    #[test]
    fn summary_stats_reports_mean_sum_and_argmax() {
        let records = sample();
        let stats = summary_stats(&records, Metric::TourismIndex).unwrap();
        assert_eq!(stats.sum, 12.0);
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.max, 6.0);
        assert_eq!(stats.argmax, 2);
    }

    #[test]
    fn summary_stats_argmax_tie_keeps_first_record() {
        let records = vec![
            record("A", "North_Governorate", 1.0, 5, 0),
            record("B", "North_Governorate", 1.0, 5, 0),
        ];
        let stats = summary_stats(&records, Metric::Hotels).unwrap();
        assert_eq!(stats.argmax, 0);
    }

    #[test]
    fn value_counts_orders_by_count_descending() {
        let records = vec![
            record("A", "North_Governorate", 1.0, 1, 0),
            record("B", "North_Governorate", 1.0, 1, 2),
            record("C", "North_Governorate", 1.0, 1, 0),
        ];
        let counts = value_counts(&records, |r| &r.has_restaurants);
        assert_eq!(
            counts,
            vec![("0".to_string(), 2), ("1".to_string(), 1)]
        );
    }
}
