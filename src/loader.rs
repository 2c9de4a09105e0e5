use crate::errors::LoadError;
use crate::model::{
    Cell, CellValue, ColumnLayout, Document, Hyperlink, MergeRange, RowLayout, Sheet,
    SheetVisibility,
};
use crate::styles::{cell_style_from_umya, is_date_format};
use std::path::Path;
use tracing::{debug, info};
use umya_spreadsheet::{CellRawValue, SheetStateValues};
use umya_spreadsheet::helper::coordinate::index_from_coordinate;

/// Reads an xlsx workbook into a [`Document`], keeping tab order, cell
/// values, styles, hyperlinks, row and column layout, sheet visibility, merged
/// ranges and the workbook theme.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    if !path.exists() {
        return Err(LoadError::new(path, "file does not exist"));
    }
    if !path.is_file() {
        return Err(LoadError::new(path, "path is not a file"));
    }

    let book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| LoadError::new(path, "not a readable spreadsheet").with_source(e))?;

    let mut document = Document::new();
    document.set_theme(book.get_theme().clone());
    for worksheet in book.get_sheet_collection_no_check() {
        let sheet = load_sheet(worksheet);
        debug!(
            sheet = sheet.name(),
            rows = sheet.row_count(),
            columns = sheet.max_column(),
            "loaded sheet"
        );
        document
            .push_sheet(sheet)
            .map_err(|e| LoadError::new(path, "corrupt workbook structure").with_source(e))?;
    }

    if document.is_empty() {
        return Err(LoadError::new(path, "workbook contains no sheets"));
    }

    info!(path = %path.display(), sheets = document.len(), "loaded workbook");
    Ok(document)
}

fn load_sheet(worksheet: &umya_spreadsheet::Worksheet) -> Sheet {
    let mut sheet = Sheet::new(worksheet.get_name());
    sheet.set_visibility(match worksheet.get_state() {
        SheetStateValues::Visible => SheetVisibility::Visible,
        SheetStateValues::Hidden => SheetVisibility::Hidden,
        SheetStateValues::VeryHidden => SheetVisibility::VeryHidden,
    });

    for cell in worksheet.get_cell_collection() {
        let coordinate = cell.get_coordinate();
        let col = *coordinate.get_col_num();
        let row = *coordinate.get_row_num();

        let style = cell_style_from_umya(cell.get_style());
        let value = load_value(cell, style.number_format.as_deref());
        let hyperlink = cell.get_hyperlink().map(|link| Hyperlink {
            url: link.get_url().to_string(),
            tooltip: Some(link.get_tooltip().to_string()).filter(|t| !t.is_empty()),
            location: *link.get_location(),
        });

        sheet.set_cell(
            row,
            col,
            Cell {
                value,
                style,
                hyperlink,
            },
        );
    }

    for col in 1..=worksheet.get_highest_column() {
        if let Some(dimension) = worksheet.get_column_dimension_by_number(&col) {
            sheet.set_column(
                col,
                ColumnLayout {
                    width: *dimension.get_width(),
                    hidden: *dimension.get_hidden(),
                },
            );
        }
    }

    for row in worksheet.get_row_dimensions() {
        let layout = RowLayout {
            height: *row.get_height(),
            custom_height: *row.get_custom_height(),
            hidden: *row.get_hidden(),
        };
        if layout.height != 0.0 || layout.custom_height || layout.hidden {
            sheet.set_row(*row.get_row_num(), layout);
        }
    }

    for range in worksheet.get_merge_cells() {
        if let Some(merge) = parse_merge_range(&range.get_range()) {
            sheet.add_merge(merge);
        }
    }

    sheet
}

/// Formula cells contribute their cached result.
fn load_value(cell: &umya_spreadsheet::Cell, number_format: Option<&str>) -> CellValue {
    #[allow(unreachable_patterns)]
    match cell.get_cell_value().get_raw_value() {
        CellRawValue::Numeric(n) => {
            if number_format.is_some_and(is_date_format) {
                CellValue::Date(*n)
            } else {
                CellValue::Number(*n)
            }
        }
        CellRawValue::Bool(b) => CellValue::Bool(*b),
        CellRawValue::String(s) => CellValue::Text(s.to_string()),
        CellRawValue::RichText(rich) => CellValue::RichText(rich.clone()),
        CellRawValue::Lazy(s) => {
            let text: &str = s.as_ref();
            if let Ok(n) = text.parse::<f64>() {
                CellValue::Number(n)
            } else if text.eq_ignore_ascii_case("TRUE") {
                CellValue::Bool(true)
            } else if text.eq_ignore_ascii_case("FALSE") {
                CellValue::Bool(false)
            } else {
                CellValue::Text(text.to_string())
            }
        }
        CellRawValue::Error(_) => CellValue::Error(cell.get_value().to_string()),
        CellRawValue::Empty => CellValue::Empty,
        _ => CellValue::Text(cell.get_value().to_string()),
    }
}

pub(crate) fn parse_merge_range(range: &str) -> Option<MergeRange> {
    let (start, end) = range.split_once(':')?;
    let (first_col, first_row, _, _) = index_from_coordinate(start);
    let (last_col, last_row, _, _) = index_from_coordinate(end);
    Some(MergeRange {
        first_row: first_row?,
        first_col: first_col?,
        last_row: last_row?,
        last_col: last_col?,
    })
}
