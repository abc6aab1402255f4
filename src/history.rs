//! Location history: admission of raw export records into a read-only,
//! time-ordered table of samples.
//!
//! Raw records come from a Google Takeout style export, with coordinates as
//! integers scaled by 1e7 and a millisecond timestamp. Only samples whose
//! recorded accuracy is strictly below [`ACCURACY_THRESHOLD`] are admitted.

use std::io::Read;

use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Coordinate, Result};

/// Samples with accuracy at or above this are dropped on admission.
pub const ACCURACY_THRESHOLD: u32 = 1000;

const E7: f64 = 10_000_000.0;

/// One record of the raw export, before conversion and filtering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLocationRecord {
    #[serde(rename = "latitudeE7")]
    pub latitude_e7: i64,
    #[serde(rename = "longitudeE7")]
    pub longitude_e7: i64,
    /// Exports write this as a string; numbers are accepted too.
    #[serde(deserialize_with = "lenient_i64")]
    pub timestamp_ms: i64,
    #[serde(default)]
    pub accuracy: Option<u32>,
}

impl RawLocationRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude_e7 as f64 / E7, self.longitude_e7 as f64 / E7)
    }
}

#[derive(Deserialize)]
struct TakeoutExport {
    locations: Vec<RawLocationRecord>,
}

fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(i64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse::<i64>().map_err(serde::de::Error::custom),
    }
}

/// An admitted history point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub timestamp_ms: i64,
    pub coordinate: Coordinate,
    pub accuracy: u32,
}

impl HistorySample {
    pub fn new(timestamp_ms: i64, coordinate: Coordinate, accuracy: u32) -> Self {
        Self { timestamp_ms, coordinate, accuracy }
    }
}

/// Admitted samples, sorted ascending by timestamp. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationHistory {
    samples: Vec<HistorySample>,
}

impl LocationHistory {
    /// Admit already-converted samples: drop inaccurate or off-globe ones,
    /// then sort by timestamp. Equal timestamps keep their input order.
    pub fn from_samples(samples: impl IntoIterator<Item = HistorySample>) -> Self {
        let mut total = 0usize;
        let mut samples: Vec<HistorySample> = samples
            .into_iter()
            .inspect(|_| total += 1)
            .filter(|s| s.accuracy < ACCURACY_THRESHOLD && s.coordinate.is_valid())
            .collect();
        samples.sort_by_key(|s| s.timestamp_ms);

        debug!("Admitted {} of {} history samples", samples.len(), total);
        Self { samples }
    }

    /// Convert raw export records and admit them. Records without an
    /// accuracy value are not admitted.
    pub fn admit(records: impl IntoIterator<Item = RawLocationRecord>) -> Self {
        Self::from_samples(records.into_iter().filter_map(|r| {
            let accuracy = r.accuracy?;
            Some(HistorySample::new(r.timestamp_ms, r.coordinate(), accuracy))
        }))
    }

    /// Load a Takeout `{"locations": [...]}` document and admit its records.
    pub fn from_takeout_reader<R: Read>(reader: R) -> Result<Self> {
        let export: TakeoutExport = serde_json::from_reader(reader)?;
        let raw_count = export.locations.len();
        let history = Self::admit(export.locations);
        info!(
            "Loaded location history: {} records, {} admitted",
            raw_count,
            history.len()
        );
        Ok(history)
    }

    pub fn samples(&self) -> &[HistorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
