use crate::model::{CellValue, Sheet};
use crate::styles::INTEGER_FORMAT;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumString};
use tracing::debug;

const FIRST_DATA_ROW: u32 = 2;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    ValueEnum,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum IntegerFormatPolicy {
    /// Whole-number columns always get the integer format.
    #[default]
    Override,
    /// Only cells still using the General format are retyped.
    GeneralOnly,
    Off,
}

/// Forces [`INTEGER_FORMAT`] on data cells of every column whose values are
/// all whole numbers. Returns the retyped columns in ascending order.
///
/// A column qualifies when it holds at least one value below the header, every
/// value is a finite number without fractional part, and no blank cell
/// follows a non-blank one. Dates, text, booleans and errors disqualify.
pub fn normalize_integer_columns(sheet: &mut Sheet, policy: IntegerFormatPolicy) -> Vec<u32> {
    if policy == IntegerFormatPolicy::Off {
        return Vec::new();
    }

    let last_row = sheet.row_count();
    if last_row < FIRST_DATA_ROW {
        return Vec::new();
    }

    let columns: BTreeSet<u32> = sheet
        .cells()
        .filter(|(row, _, _)| *row >= FIRST_DATA_ROW)
        .map(|(_, col, _)| col)
        .collect();

    let integral: Vec<u32> = columns
        .into_iter()
        .filter(|&col| column_is_integral(sheet, col, last_row))
        .collect();

    if integral.is_empty() {
        return integral;
    }

    for (row, col, cell) in sheet.cells_mut() {
        if row < FIRST_DATA_ROW || row > last_row || cell.value.is_empty() {
            continue;
        }
        if integral.binary_search(&col).is_err() {
            continue;
        }
        let retype = match policy {
            IntegerFormatPolicy::Override => true,
            IntegerFormatPolicy::GeneralOnly => cell.style.number_format.is_none(),
            IntegerFormatPolicy::Off => false,
        };
        if retype {
            cell.style.number_format = Some(INTEGER_FORMAT.to_string());
        }
    }

    debug!(sheet = sheet.name(), columns = ?integral, "applied integer format");
    integral
}

fn column_is_integral(sheet: &Sheet, col: u32, last_row: u32) -> bool {
    let mut seen_value = false;
    for row in FIRST_DATA_ROW..=last_row {
        let value = sheet.cell(row, col).map(|cell| &cell.value);
        match value {
            None => {
                if seen_value {
                    return false;
                }
            }
            Some(value) if value.is_empty() => {
                if seen_value {
                    return false;
                }
            }
            Some(CellValue::Number(n)) if n.is_finite() && n.fract() == 0.0 => {
                seen_value = true;
            }
            Some(_) => return false,
        }
    }
    seen_value
}
