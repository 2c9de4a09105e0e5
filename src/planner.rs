use crate::errors::InvalidConfigError;
use crate::model::Document;
use tracing::debug;

/// Half-open range `[start, end)` over the data rows of the selected sheet,
/// counted from zero (data row 0 is spreadsheet row 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: u32,
    pub end: u32,
}

impl Chunk {
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Spreadsheet rows (1-based, header excluded) covered by this chunk.
    pub fn source_rows(&self) -> std::ops::Range<u32> {
        (self.start + 2)..(self.end + 2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    /// Name of the sheet being partitioned.
    pub sheet: String,
    /// Every sheet name of the source, in tab order.
    pub sheet_order: Vec<String>,
    pub data_rows: u32,
    pub rows_per_file: u32,
    pub chunks: Vec<Chunk>,
}

/// Picks the sheet with the most data rows (first one wins ties) and cuts its
/// data rows into chunks of `rows_per_file`.
///
/// A selected sheet without data rows still yields a single empty chunk, so
/// the run produces one header-only file.
pub fn plan_partition(
    document: &Document,
    rows_per_file: usize,
) -> Result<PartitionPlan, InvalidConfigError> {
    if rows_per_file == 0 {
        return Err(
            InvalidConfigError::new("rows_per_file must be greater than zero")
                .with_field("rows_per_file"),
        );
    }
    let rows_per_file = u32::try_from(rows_per_file).map_err(|_| {
        InvalidConfigError::new(format!("rows_per_file {rows_per_file} is too large"))
            .with_field("rows_per_file")
    })?;

    let mut selected: Option<(&str, u32)> = None;
    for sheet in document.sheets() {
        let count = sheet.data_row_count();
        match selected {
            Some((_, best)) if best >= count => {}
            _ => selected = Some((sheet.name(), count)),
        }
    }
    let (sheet, data_rows) = selected.ok_or_else(|| {
        InvalidConfigError::new("workbook has no sheets to split").with_field("source_path")
    })?;

    let chunks = chunk_rows(data_rows, rows_per_file);
    debug!(
        sheet,
        data_rows,
        rows_per_file,
        chunks = chunks.len(),
        "planned partition"
    );

    Ok(PartitionPlan {
        sheet: sheet.to_string(),
        sheet_order: document.sheet_names(),
        data_rows,
        rows_per_file,
        chunks,
    })
}

fn chunk_rows(data_rows: u32, rows_per_file: u32) -> Vec<Chunk> {
    if data_rows == 0 {
        return vec![Chunk { start: 0, end: 0 }];
    }
    let count = data_rows.div_ceil(rows_per_file);
    (0..count)
        .map(|i| {
            let start = i * rows_per_file;
            let end = start.saturating_add(rows_per_file).min(data_rows);
            Chunk { start, end }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, CellValue, Sheet};

    fn sheet_with_rows(name: &str, rows: u32) -> Sheet {
        let mut sheet = Sheet::new(name);
        for row in 1..=rows {
            sheet.set_cell(row, 1, Cell::new(CellValue::Number(row as f64)));
        }
        sheet
    }

    fn document(sheets: &[(&str, u32)]) -> Document {
        let mut doc = Document::new();
        for (name, rows) in sheets {
            doc.push_sheet(sheet_with_rows(name, *rows)).unwrap();
        }
        doc
    }

    #[test]
    fn chunks_cover_every_row_once() {
        let chunks = chunk_rows(2500, 1000);
        assert_eq!(
            chunks,
            vec![
                Chunk { start: 0, end: 1000 },
                Chunk { start: 1000, end: 2000 },
                Chunk { start: 2000, end: 2500 },
            ]
        );
        let total: u32 = chunks.iter().map(Chunk::len).sum();
        assert_eq!(total, 2500);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let chunks = chunk_rows(3000, 1000);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2], Chunk { start: 2000, end: 3000 });
    }

    #[test]
    fn oversized_chunk_holds_everything() {
        assert_eq!(chunk_rows(2500, 5000), vec![Chunk { start: 0, end: 2500 }]);
    }

    #[test]
    fn empty_sheet_yields_single_empty_chunk() {
        let chunks = chunk_rows(0, 10);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_empty());
    }

    #[test]
    fn selects_largest_sheet() {
        let doc = document(&[("Meta", 4), ("Data", 2501), ("Notes", 10)]);
        let plan = plan_partition(&doc, 1000).unwrap();
        assert_eq!(plan.sheet, "Data");
        assert_eq!(plan.data_rows, 2500);
        assert_eq!(plan.chunks.len(), 3);
        assert_eq!(plan.sheet_order, vec!["Meta", "Data", "Notes"]);
    }

    #[test]
    fn ties_go_to_first_sheet() {
        let doc = document(&[("A", 6), ("B", 6)]);
        assert_eq!(plan_partition(&doc, 2).unwrap().sheet, "A");
    }

    #[test]
    fn zero_rows_per_file_is_rejected() {
        let doc = document(&[("A", 6)]);
        let err = plan_partition(&doc, 0).unwrap_err();
        assert_eq!(err.field(), Some("rows_per_file"));
    }

    #[test]
    fn empty_document_is_rejected() {
        assert!(plan_partition(&Document::new(), 10).is_err());
    }

    #[test]
    fn source_rows_skip_header() {
        let chunk = Chunk { start: 0, end: 3 };
        assert_eq!(chunk.source_rows(), 2..5);
    }
}
