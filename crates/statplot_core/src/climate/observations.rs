//! Loading daily station observations from CSV.

use std::fs::File;
use std::io;
use std::path::Path;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::ClimateError;

/// Observation codes the aggregation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    /// Daily minimum temperature
    Tmin,
    /// Daily maximum temperature
    Tmax,
}

impl Element {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "TMIN" => Some(Element::Tmin),
            "TMAX" => Some(Element::Tmax),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Element::Tmin => "TMIN",
            Element::Tmax => "TMAX",
        }
    }
}

/// One station reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: Date,
    pub element: Element,
    /// Reading in tenths of a degree Celsius
    pub value_tenths: f64,
}

impl Observation {
    #[inline]
    pub fn celsius(&self) -> f64 {
        self.value_tenths / 10.0
    }
}

/// Columns read from each row. The `ID` column is not needed.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Element")]
    element: String,
    #[serde(rename = "Data_Value")]
    data_value: String,
}

/// Load observations from a CSV file with `ID,Date,Element,Data_Value`
/// columns.
pub fn load_observations(path: &Path) -> Result<Vec<Observation>, ClimateError> {
    let file = File::open(path).map_err(|source| ClimateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let observations = read_observations(file)?;
    tracing::debug!(
        path = %path.display(),
        rows = observations.len(),
        "loaded climate observations"
    );
    Ok(observations)
}

/// Parse observations from any CSV source.
///
/// Rows whose element is neither TMIN nor TMAX are skipped.
pub fn read_observations<R: io::Read>(source: R) -> Result<Vec<Observation>, ClimateError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);
    let headers = reader.headers()?.clone();

    let mut observations = Vec::new();
    let mut skipped = 0usize;
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record)? {
        let line = record.position().map(csv::Position::line);
        let row: RawRow = record.deserialize(Some(&headers)).map_err(|source| ClimateError::Csv {
            line,
            source,
        })?;

        let Some(element) = Element::from_code(&row.element) else {
            skipped += 1;
            continue;
        };

        let date: Date = row.date.parse().map_err(|source| ClimateError::InvalidDate {
            line,
            value: row.date.clone(),
            source,
        })?;

        let value_tenths: f64 = row
            .data_value
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| ClimateError::InvalidValue {
                line,
                value: row.data_value.clone(),
            })?;

        observations.push(Observation {
            date,
            element,
            value_tenths,
        });
    }

    if skipped > 0 {
        tracing::debug!(skipped, "skipped rows with unrecognised element codes");
    }
    Ok(observations)
}
