use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use umya_spreadsheet::drawing::Theme;
use umya_spreadsheet::{Alignment, Fill, Font, Protection, RichText, Style};

/// A workbook held fully in memory. Sheet order is tab order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    sheets: IndexMap<String, Sheet>,
    /// Workbook theme; theme-indexed colors in cell styles resolve against it.
    theme: Option<Theme>,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.sheets == other.sheets
            && theme_colors(self.theme.as_ref()) == theme_colors(other.theme.as_ref())
    }
}

fn theme_colors(theme: Option<&Theme>) -> Option<Vec<String>> {
    theme.map(|t| t.get_theme_elements().get_color_scheme().get_color_map())
}

#[derive(Debug, Error)]
#[error("duplicate sheet name '{0}'")]
pub struct DuplicateSheetName(pub String);

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sheet after the existing ones.
    pub fn push_sheet(&mut self, sheet: Sheet) -> Result<(), DuplicateSheetName> {
        if self.sheets.contains_key(sheet.name()) {
            return Err(DuplicateSheetName(sheet.name().to_string()));
        }
        self.sheets.insert(sheet.name().to_string(), sheet);
        Ok(())
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.get_mut(name)
    }

    pub fn sheet_position(&self, name: &str) -> Option<usize> {
        self.sheets.get_index_of(name)
    }

    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.values()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }
}

/// A single worksheet. Cells are keyed by `(row, col)`, both 1-based, so
/// iteration is row-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u32), Cell>,
    columns: BTreeMap<u32, ColumnLayout>,
    rows: BTreeMap<u32, RowLayout>,
    merges: Vec<MergeRange>,
    visibility: SheetVisibility,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    pub fn cell_mut(&mut self, row: u32, col: u32) -> &mut Cell {
        self.cells.entry((row, col)).or_default()
    }

    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) {
        self.cells.insert((row, col), cell);
    }

    /// All populated cells in row-major order as `(row, col, cell)`.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        self.cells.iter().map(|(&(row, col), cell)| (row, col, cell))
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = (u32, u32, &mut Cell)> {
        self.cells
            .iter_mut()
            .map(|(&(row, col), cell)| (row, col, cell))
    }

    /// Populated cells of one row as `(col, cell)`, left to right.
    pub fn row(&self, row: u32) -> impl Iterator<Item = (u32, &Cell)> {
        self.cells
            .range((row, 0)..=(row, u32::MAX))
            .map(|(&(_, col), cell)| (col, cell))
    }

    /// Number of rows up to and including the last one carrying a value or a
    /// hyperlink. Rows that only hold formatting do not extend the count.
    pub fn row_count(&self) -> u32 {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.has_content())
            .map(|(&(row, _), _)| row)
            .max()
            .unwrap_or(0)
    }

    /// Rows below the header row.
    pub fn data_row_count(&self) -> u32 {
        self.row_count().saturating_sub(1)
    }

    pub fn max_column(&self) -> u32 {
        self.cells.keys().map(|&(_, col)| col).max().unwrap_or(0)
    }

    pub fn columns(&self) -> impl Iterator<Item = (u32, &ColumnLayout)> {
        self.columns.iter().map(|(&col, layout)| (col, layout))
    }

    pub fn set_column(&mut self, col: u32, layout: ColumnLayout) {
        self.columns.insert(col, layout);
    }

    pub fn rows(&self) -> impl Iterator<Item = (u32, &RowLayout)> {
        self.rows.iter().map(|(&row, layout)| (row, layout))
    }

    pub fn row_layout(&self, row: u32) -> Option<&RowLayout> {
        self.rows.get(&row)
    }

    pub fn set_row(&mut self, row: u32, layout: RowLayout) {
        self.rows.insert(row, layout);
    }

    pub fn visibility(&self) -> SheetVisibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: SheetVisibility) {
        self.visibility = visibility;
    }

    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    pub fn add_merge(&mut self, range: MergeRange) {
        self.merges.push(range);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
    pub hyperlink: Option<Hyperlink>,
}

impl Cell {
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_hyperlink(mut self, hyperlink: Hyperlink) -> Self {
        self.hyperlink = Some(hyperlink);
        self
    }

    pub fn has_content(&self) -> bool {
        !self.value.is_empty() || self.hyperlink.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    /// Spreadsheet serial date; the display format lives in the cell style.
    Date(f64),
    /// Error literal such as `#DIV/0!`.
    Error(String),
    /// Text with per-run fonts.
    RichText(RichText),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.is_empty(),
            CellValue::RichText(rich) => rich.get_text().is_empty(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) | CellValue::Date(n) => write!(f, "{n}"),
            CellValue::Text(text) | CellValue::Error(text) => f.write_str(text),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
            CellValue::RichText(rich) => f.write_str(&rich.get_text()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    pub url: String,
    pub tooltip: Option<String>,
    /// True when `url` points inside the workbook (e.g. `Meta!A1`).
    pub location: bool,
}

impl Hyperlink {
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            tooltip: None,
            location: false,
        }
    }
}

/// Presentation of a cell. Each facet is either absent (workbook default) or
/// a complete value; facets are replaced whole, never merged. Equality is
/// structural, so theme indices and tints count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStyle {
    pub font: Option<Font>,
    /// A style carrying only the border facet; umya keeps its `Borders` type
    /// private to the crate.
    pub borders: Option<Style>,
    pub fill: Option<Fill>,
    pub number_format: Option<String>,
    pub protection: Option<Protection>,
    pub alignment: Option<Alignment>,
}

impl CellStyle {
    pub fn is_default(&self) -> bool {
        self.font.is_none()
            && self.borders.is_none()
            && self.fill.is_none()
            && self.number_format.is_none()
            && self.protection.is_none()
            && self.alignment.is_none()
    }

    pub fn descriptor(&self) -> StyleDescriptor {
        crate::styles::descriptor_from_cell_style(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
    pub width: f64,
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub height: f64,
    pub custom_height: bool,
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SheetVisibility {
    #[default]
    Visible,
    Hidden,
    VeryHidden,
}

/// Inclusive rectangular range, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl MergeRange {
    pub fn within_row(&self, row: u32) -> bool {
        self.first_row == row && self.last_row == row
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<BordersDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<AlignmentDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection: Option<ProtectionDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
}

impl StyleDescriptor {
    pub fn is_default(&self) -> bool {
        self.font.is_none()
            && self.fill.is_none()
            && self.borders.is_none()
            && self.alignment.is_none()
            && self.protection.is_none()
            && self.number_format.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FontDescriptor {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<String>,
    pub strikethrough: Option<bool>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillDescriptor {
    Pattern(PatternFillDescriptor),
    Gradient(GradientFillDescriptor),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternFillDescriptor {
    pub pattern_type: Option<String>,
    pub foreground_color: Option<String>,
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GradientFillDescriptor {
    pub degree: Option<f64>,
    pub stops: Vec<GradientStopDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStopDescriptor {
    pub position: f64,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BorderSideDescriptor {
    pub style: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BordersDescriptor {
    pub left: Option<BorderSideDescriptor>,
    pub right: Option<BorderSideDescriptor>,
    pub top: Option<BorderSideDescriptor>,
    pub bottom: Option<BorderSideDescriptor>,
    pub diagonal: Option<BorderSideDescriptor>,
    pub vertical: Option<BorderSideDescriptor>,
    pub horizontal: Option<BorderSideDescriptor>,
    pub diagonal_up: Option<bool>,
    pub diagonal_down: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignmentDescriptor {
    pub horizontal: Option<String>,
    pub vertical: Option<String>,
    pub wrap_text: Option<bool>,
    pub text_rotation: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProtectionDescriptor {
    pub locked: Option<bool>,
    pub hidden: Option<bool>,
}
