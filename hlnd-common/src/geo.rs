//! Map positions for filtered articles
//!
//! NOT GEOCODING. Articles carry city and country names but no coordinates,
//! so every point is drawn uniformly at random inside a fixed region.
//! `placeholder_coordinates` is the one function to replace once a real
//! geocoder exists; every `MapPoint` is flagged `placeholder` until then.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::record::{ArticleRecord, RecordId};

/// Rectangular latitude/longitude region points are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Default for MapRegion {
    /// Northern India, matching the dataset's coverage
    fn default() -> Self {
        Self {
            lat_min: 20.0,
            lat_max: 30.0,
            lon_min: 75.0,
            lon_max: 85.0,
        }
    }
}

impl MapRegion {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&latitude)
            && (self.lon_min..=self.lon_max).contains(&longitude)
    }

    /// Swap inverted edges so sampling never panics on a misconfigured region
    pub fn normalized(self) -> Self {
        Self {
            lat_min: self.lat_min.min(self.lat_max),
            lat_max: self.lat_min.max(self.lat_max),
            lon_min: self.lon_min.min(self.lon_max),
            lon_max: self.lon_min.max(self.lon_max),
        }
    }
}

/// One article placed on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub id: RecordId,
    pub cities: Vec<String>,
    pub anomaly_score: Option<f64>,
    pub is_anomaly: bool,
    pub latitude: f64,
    pub longitude: f64,
    /// Always true: coordinates are random, not geocoded
    pub placeholder: bool,
}

/// Random stand-in for geocoding: `(latitude, longitude)` inside `region`
///
/// Latitude and longitude are drawn independently and uniformly.
pub fn placeholder_coordinates<R: Rng + ?Sized>(region: &MapRegion, rng: &mut R) -> (f64, f64) {
    let region = region.normalized();
    (
        sample(rng, region.lat_min, region.lat_max),
        sample(rng, region.lon_min, region.lon_max),
    )
}

fn sample<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if low == high {
        low
    } else {
        rng.gen_range(low..=high)
    }
}

/// Place every article of the subset, in subset order
pub fn map_points<R: Rng + ?Sized>(
    subset: &[&ArticleRecord],
    region: &MapRegion,
    rng: &mut R,
) -> Vec<MapPoint> {
    subset
        .iter()
        .map(|record| {
            let (latitude, longitude) = placeholder_coordinates(region, rng);
            MapPoint {
                id: record.id,
                cities: record.geo_cities.clone(),
                anomaly_score: record.anomaly_score,
                is_anomaly: record.is_anomaly,
                latitude,
                longitude,
                placeholder: true,
            }
        })
        .collect()
}
