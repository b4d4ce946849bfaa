use crate::regions;
use crate::types::{Dataset, TownRecord};
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

const COL_TOWN: &str = "Town";
const COL_REF_AREA: &str = "refArea";
const COL_TOURISM_INDEX: &str = "Tourism Index";
const COL_HOTELS: &str = "Total number of hotels";
const COL_RESTAURANTS: &str = "Total number of restaurants";
const COL_RESTAURANT_EXISTS: &str = "Existence of restaurants - exists";

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    println!("Loading dataset from {:?}...", path);

    let file = File::open(path)
        .with_context(|| format!("Failed to open data file: {:?}", path))?;
    let mut rdr = ReaderBuilder::new().from_reader(file);
    let headers = rdr.headers().context("Failed to read CSV headers")?.clone();

    // Identify indices for the analytic columns; metadata columns such as
    // "Observation URI", "references", "publisher" and "dataset" are simply
    // never read.
    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("Required column '{}' not found in dataset", name))
    };

    let town_idx = column(COL_TOWN)?;
    let ref_area_idx = column(COL_REF_AREA)?;
    let index_idx = column(COL_TOURISM_INDEX)?;
    let hotels_idx = column(COL_HOTELS)?;
    let restaurants_idx = column(COL_RESTAURANTS)?;
    let exists_idx = column(COL_RESTAURANT_EXISTS)?;

    let mut records = Vec::new();

    for result in rdr.records() {
        let record = result.context("Failed to parse CSV record")?;

        let town = record.get(town_idx).unwrap_or("").trim().to_string();
        if town.is_empty() {
            continue;
        }

        let region = regions::clean_region(record.get(ref_area_idx))
            .unwrap_or("")
            .to_string();

        let tourism_index: f64 = record
            .get(index_idx)
            .unwrap_or("0")
            .trim()
            .parse()
            .unwrap_or(0.0);
        let hotels: u32 = record
            .get(hotels_idx)
            .unwrap_or("0")
            .trim()
            .parse()
            .unwrap_or(0);
        let restaurants: u32 = record
            .get(restaurants_idx)
            .unwrap_or("0")
            .trim()
            .parse()
            .unwrap_or(0);
        let has_restaurants = record.get(exists_idx).unwrap_or("").trim().to_string();

        records.push(TownRecord {
            town,
            region,
            tourism_index,
            hotels,
            restaurants,
            has_restaurants,
        });
    }

    println!("Loaded {} town records", records.len());

    Ok(Dataset::new(records))
}
