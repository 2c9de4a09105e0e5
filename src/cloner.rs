use crate::model::{Cell, CellStyle, Sheet};

/// Copies `source` into `dest` at `(row, col)`: value first, then each style
/// facet as an owned copy (only when the source styles anything), then the
/// hyperlink. Whatever `dest` held at that position is replaced.
pub fn clone_cell(source: &Cell, dest: &mut Sheet, row: u32, col: u32) {
    let target = dest.cell_mut(row, col);
    target.value = source.value.clone();

    target.style = if source.style.is_default() {
        CellStyle::default()
    } else {
        clone_style(&source.style)
    };

    target.hyperlink = source.hyperlink.clone();
}

fn clone_style(style: &CellStyle) -> CellStyle {
    CellStyle {
        font: style.font.clone(),
        borders: style.borders.clone(),
        fill: style.fill.clone(),
        number_format: style.number_format.clone(),
        protection: style.protection.clone(),
        alignment: style.alignment.clone(),
    }
}

/// Clones every cell of `row` in `source` into `dest_row` of `dest`.
pub fn clone_row(source: &Sheet, row: u32, dest: &mut Sheet, dest_row: u32) {
    for (col, cell) in source.row(row) {
        clone_cell(cell, dest, dest_row, col);
    }
}
