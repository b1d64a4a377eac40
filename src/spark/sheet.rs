//! Reading well concentrations from a Spark export workbook

use super::concentration::{concentration_cell, normalize_concentration};
use super::well::Well;
use crate::error::SparkError;
use anyhow::Result;
use calamine::{Data, Range, Reader as _, open_workbook_auto_from_rs};
use std::io::Cursor;
use tracing::{debug, trace};

/// Column A: well label
pub const WELL_COLUMN: u32 = 0;

/// Column B: raw value, used when the concentration is `NoCalc`
pub const RAW_VALUE_COLUMN: u32 = 1;

/// Column C: calculated concentration in ng/µL
pub const CONCENTRATION_COLUMN: u32 = 2;

static EMPTY_CELL: Data = Data::Empty;

/// One well row of the export
#[derive(Debug, Clone, PartialEq)]
pub struct WellReading {
    /// 1-based spreadsheet row
    pub row: u32,
    /// Label as written in the sheet
    pub label: String,
    pub well: Well,
    /// Concentration in ng/µL
    pub concentration: f64,
}

/// Open a workbook held in memory (xls or xlsx) and read the first worksheet
///
/// # Errors
///
/// Returns a sheet error if the workbook cannot be opened or has no
/// worksheet, and a concentration error for a well row without a usable value
pub fn read_spark_readings(bytes: &[u8]) -> Result<Vec<WellReading>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| SparkError::sheet(format!("Failed to open the Spark output file: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SparkError::sheet("The Spark output file has no worksheets"))?
        .map_err(|e| SparkError::sheet(format!("Failed to read the first worksheet: {e}")))?;

    readings_from_range(&range)
}

/// Collect every row whose column A holds a well label
///
/// # Errors
///
/// Returns a concentration error if a well row has no recognizable
/// concentration
pub fn readings_from_range(range: &Range<Data>) -> Result<Vec<WellReading>> {
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        debug!("Worksheet is empty");
        return Ok(Vec::new());
    };

    let mut readings = Vec::new();
    for row in start.0..=end.0 {
        let Some(Data::String(label)) = range.get_value((row, WELL_COLUMN)) else {
            continue;
        };
        let Some(well) = Well::parse_label(label) else {
            trace!("Skipping row {}: '{}' is not a well", row + 1, label);
            continue;
        };

        let cell = concentration_cell(
            range.get_value((row, CONCENTRATION_COLUMN)).unwrap_or(&EMPTY_CELL),
            range.get_value((row, RAW_VALUE_COLUMN)).unwrap_or(&EMPTY_CELL),
        );
        let concentration = normalize_concentration(cell).ok_or_else(|| {
            return SparkError::concentration(format!(
                "Invalid concentration '{cell}' for well {label}, row {}",
                row + 1
            ));
        })?;

        readings.push(WellReading {
            row: row + 1,
            label: label.clone(),
            well,
            concentration,
        });
    }

    debug!("Found {} well readings", readings.len());
    Ok(readings)
}
