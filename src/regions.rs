use geo::Point;

// Governorate centroids (name as it appears after refArea cleaning, lat, lon).
const REGION_COORDINATES: &[(&str, f64, f64)] = &[
    ("Beirut_Governorate", 33.8938, 35.5018),
    ("Mount_Lebanon_Governorate", 33.8101, 35.5973),
    ("North_Governorate", 34.4381, 35.8308),
    ("Akkar_Governorate", 34.5328, 36.1328),
    ("Baalbek-Hermel_Governorate", 34.0058, 36.2181),
    ("Beqaa_Governorate", 33.8463, 35.9019),
    ("Nabatieh_Governorate", 33.3772, 35.4836),
    ("South_Governorate", 33.2705, 35.2038),
];

/// Keeps only the suffix after the last `/` of a raw region identifier.
/// Values without a separator pass through unchanged; missing values stay
/// missing. Shared by the loader and anywhere a region grouping key is
/// derived.
pub fn clean_region(raw: Option<&str>) -> Option<&str> {
    raw.map(|value| match value.rfind('/') {
        Some(idx) => &value[idx + 1..],
        None => value,
    })
}

/// Exact-match lookup of a cleaned region name. A miss is `None`, not an
/// error: the geo chart drops unmatched rows, every other chart keeps them.
pub fn coordinates_for(region: &str) -> Option<Point<f64>> {
    REGION_COORDINATES
        .iter()
        .find(|(name, _, _)| *name == region)
        .map(|&(_, lat, lon)| Point::new(lon, lat))
}
