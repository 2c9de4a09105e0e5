use crate::errors::WriteError;
use crate::model::{CellValue, Document, Hyperlink, MergeRange, Sheet, SheetVisibility};
use crate::styles::umya_style_from_cell_style;
use std::path::{Path, PathBuf};
use tracing::debug;
use umya_spreadsheet::helper::coordinate::coordinate_from_index;
use umya_spreadsheet::{SheetStateValues, Spreadsheet, Worksheet};

pub const NUMBER_PLACEHOLDER: &str = "{number}";
const DEFAULT_EXTENSION: &str = "xlsx";

/// One-based sequence number, zero-padded to at least three digits.
pub fn format_sequence(index: usize) -> String {
    format!("{index:03}")
}

/// `<stem>_<suffix>.<ext>` with every placeholder in the template replaced.
pub fn output_file_name(stem: &str, extension: &str, suffix_template: &str, index: usize) -> String {
    let suffix = suffix_template.replace(NUMBER_PLACEHOLDER, &format_sequence(index));
    format!("{stem}_{suffix}.{extension}")
}

/// Output location for chunk `index`: next to the source unless `output_dir`
/// is given.
pub fn output_path(
    source: &Path,
    output_dir: Option<&Path>,
    suffix_template: &str,
    index: usize,
) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = source
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| source.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(output_file_name(&stem, &extension, suffix_template, index))
}

/// Serializes `document` to `path`, replacing any existing file. The workbook
/// is written to a temporary file in the same directory first and renamed
/// into place, so `path` never holds a half-written workbook.
pub fn write_document(document: &Document, path: &Path, chunk: usize) -> Result<(), WriteError> {
    let book = build_workbook(document).map_err(|e| WriteError::new(chunk, path, e))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let staging = tempfile::Builder::new()
        .prefix(".sheet-splitter-")
        .suffix(".xlsx")
        .tempfile_in(&dir)
        .map_err(|e| WriteError::new(chunk, path, e))?;

    umya_spreadsheet::writer::xlsx::write(&book, staging.path())
        .map_err(|e| WriteError::new(chunk, path, e))?;
    staging
        .persist(path)
        .map_err(|e| WriteError::new(chunk, path, e.error))?;

    debug!(chunk, path = %path.display(), "serialized workbook");
    Ok(())
}

pub(crate) fn build_workbook(document: &Document) -> Result<Spreadsheet, String> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    if let Some(theme) = document.theme() {
        book.set_theme(theme.clone());
    }
    for sheet in document.sheets() {
        let worksheet = book
            .new_sheet(sheet.name())
            .map_err(|e| format!("cannot add sheet '{}': {e}", sheet.name()))?;
        fill_worksheet(sheet, worksheet);
    }
    Ok(book)
}

fn fill_worksheet(sheet: &Sheet, worksheet: &mut Worksheet) {
    for (row, col, cell) in sheet.cells() {
        let target = worksheet.get_cell_mut((col, row));
        match &cell.value {
            CellValue::Empty => {}
            CellValue::Number(n) | CellValue::Date(n) => {
                target.set_value_number(*n);
            }
            CellValue::Text(text) => {
                target.set_value_string(text.clone());
            }
            CellValue::Bool(b) => {
                target.set_value_bool(*b);
            }
            CellValue::Error(code) => {
                target.set_value(code.clone());
            }
            CellValue::RichText(rich) => {
                target.set_rich_text(rich.clone());
            }
        }
        if !cell.style.is_default() {
            target.set_style(umya_style_from_cell_style(&cell.style));
        }
        if let Some(link) = &cell.hyperlink {
            target.set_hyperlink(umya_hyperlink(link));
        }
    }

    for (col, layout) in sheet.columns() {
        let dimension = worksheet.get_column_dimension_by_number_mut(&col);
        dimension.set_width(layout.width);
        dimension.set_hidden(layout.hidden);
    }

    for (row, layout) in sheet.rows() {
        worksheet
            .get_row_dimension_mut(&row)
            .set_height(layout.height)
            .set_custom_height(layout.custom_height)
            .set_hidden(layout.hidden);
    }

    match sheet.visibility() {
        SheetVisibility::Visible => {}
        SheetVisibility::Hidden => {
            worksheet.set_state(SheetStateValues::Hidden);
        }
        SheetVisibility::VeryHidden => {
            worksheet.set_state(SheetStateValues::VeryHidden);
        }
    }

    for merge in sheet.merges() {
        worksheet.add_merge_cells(merge_reference(merge));
    }
}

fn umya_hyperlink(link: &Hyperlink) -> umya_spreadsheet::Hyperlink {
    let mut out = umya_spreadsheet::Hyperlink::default();
    out.set_url(link.url.as_str());
    if let Some(tooltip) = &link.tooltip {
        out.set_tooltip(tooltip.as_str());
    }
    out.set_location(link.location);
    out
}

fn merge_reference(merge: &MergeRange) -> String {
    let start = coordinate_from_index(&merge.first_col, &merge.first_row);
    let end = coordinate_from_index(&merge.last_col, &merge.last_row);
    format!("{start}:{end}")
}
