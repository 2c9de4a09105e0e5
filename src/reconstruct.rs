use crate::cloner::{clone_cell, clone_row};
use crate::errors::InvalidConfigError;
use crate::model::{Document, Sheet};
use crate::planner::{Chunk, PartitionPlan};
use tracing::trace;

const HEADER_ROW: u32 = 1;

/// Builds the output workbook for one chunk: the partitioned sheet holds the
/// header plus the chunk's rows renumbered from row 2, every other sheet is
/// copied whole, and sheets follow `plan.sheet_order`.
pub fn reconstruct_chunk(
    source: &Document,
    plan: &PartitionPlan,
    chunk: Chunk,
) -> Result<Document, InvalidConfigError> {
    let mut output = Document::new();
    if let Some(theme) = source.theme() {
        output.set_theme(theme.clone());
    }

    for name in &plan.sheet_order {
        let sheet = source.sheet(name).ok_or_else(|| {
            InvalidConfigError::new(format!("sheet '{name}' is not part of the source workbook"))
        })?;

        let rebuilt = if *name == plan.sheet {
            rebuild_selected(sheet, chunk)
        } else {
            copy_passenger(sheet)
        };

        output
            .push_sheet(rebuilt)
            .map_err(|e| InvalidConfigError::new(e.to_string()))?;
    }

    Ok(output)
}

fn rebuild_selected(source: &Sheet, chunk: Chunk) -> Sheet {
    let mut sheet = Sheet::new(source.name());
    copy_layout(source, &mut sheet);

    copy_row(source, HEADER_ROW, &mut sheet, HEADER_ROW);
    for (offset, row) in chunk.source_rows().enumerate() {
        let dest_row = HEADER_ROW + 1 + offset as u32;
        copy_row(source, row, &mut sheet, dest_row);
    }

    // Merges below the header would straddle chunk boundaries.
    for merge in source.merges() {
        if merge.within_row(HEADER_ROW) {
            sheet.add_merge(*merge);
        }
    }

    trace!(
        sheet = source.name(),
        start = chunk.start,
        end = chunk.end,
        "rebuilt partitioned sheet"
    );
    sheet
}

fn copy_passenger(source: &Sheet) -> Sheet {
    let mut sheet = Sheet::new(source.name());
    copy_layout(source, &mut sheet);
    for (row, col, cell) in source.cells() {
        clone_cell(cell, &mut sheet, row, col);
    }
    for (row, layout) in source.rows() {
        sheet.set_row(row, *layout);
    }
    for merge in source.merges() {
        sheet.add_merge(*merge);
    }
    sheet
}

fn copy_row(source: &Sheet, row: u32, dest: &mut Sheet, dest_row: u32) {
    clone_row(source, row, dest, dest_row);
    if let Some(layout) = source.row_layout(row) {
        dest.set_row(dest_row, *layout);
    }
}

fn copy_layout(source: &Sheet, dest: &mut Sheet) {
    dest.set_visibility(source.visibility());
    for (col, layout) in source.columns() {
        dest.set_column(col, *layout);
    }
}
