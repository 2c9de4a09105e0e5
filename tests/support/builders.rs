#![allow(dead_code)]
use umya_spreadsheet::drawing::RgbColorModelHex;
use umya_spreadsheet::{
    Border, HorizontalAlignmentValues, NumberingFormat, PatternValues, RichText, Spreadsheet,
    TextElement, Worksheet,
};

#[derive(Clone, Debug)]
pub enum CellVal {
    Text(String),
    Num(f64),
    Date(f64),
    Bool(bool),
    Empty,
}

impl From<&str> for CellVal {
    fn from(s: &str) -> Self {
        CellVal::Text(s.to_string())
    }
}

impl From<String> for CellVal {
    fn from(s: String) -> Self {
        CellVal::Text(s)
    }
}

impl From<f64> for CellVal {
    fn from(n: f64) -> Self {
        CellVal::Num(n)
    }
}

impl From<i32> for CellVal {
    fn from(n: i32) -> Self {
        CellVal::Num(n as f64)
    }
}

impl From<bool> for CellVal {
    fn from(b: bool) -> Self {
        CellVal::Bool(b)
    }
}

fn col_index(col_letter: &str) -> u32 {
    let mut result = 0u32;
    for c in col_letter.chars() {
        result = result * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    result
}

pub fn parse_cell_ref(cell_ref: &str) -> (u32, u32) {
    let mut col_part = String::new();
    let mut row_part = String::new();
    for c in cell_ref.chars() {
        if c.is_ascii_alphabetic() {
            col_part.push(c);
        } else {
            row_part.push(c);
        }
    }
    let col = col_index(&col_part);
    let row: u32 = row_part.parse().unwrap_or(1);
    (col, row)
}

fn set_cell(sheet: &mut Worksheet, col: u32, row: u32, val: &CellVal) {
    match val {
        CellVal::Text(s) => {
            sheet.get_cell_mut((col, row)).set_value_string(s.clone());
        }
        CellVal::Num(n) => {
            sheet.get_cell_mut((col, row)).set_value_number(*n);
        }
        CellVal::Date(serial) => {
            sheet.get_cell_mut((col, row)).set_value_number(*serial);
            sheet
                .get_style_mut((col, row))
                .get_number_format_mut()
                .set_format_code(NumberingFormat::FORMAT_DATE_YYYYMMDD2);
        }
        CellVal::Bool(b) => {
            sheet.get_cell_mut((col, row)).set_value_bool(*b);
        }
        CellVal::Empty => {}
    }
}

pub fn add_sheet<'a>(book: &'a mut Spreadsheet, name: &str) -> &'a mut Worksheet {
    book.new_sheet(name).expect("add sheet")
}

/// Bold header row at `start`, then one spreadsheet row per entry of `rows`.
pub fn fill_table<H, R, V>(sheet: &mut Worksheet, start: &str, headers: &[H], rows: &[R])
where
    H: AsRef<str>,
    R: AsRef<[V]>,
    V: Into<CellVal> + Clone,
{
    let (start_col, start_row) = parse_cell_ref(start);

    for (i, header) in headers.iter().enumerate() {
        let col = start_col + i as u32;
        sheet
            .get_cell_mut((col, start_row))
            .set_value_string(header.as_ref().to_string());
        let style = sheet.get_style_mut((col, start_row));
        style.get_font_mut().set_bold(true);
    }

    for (row_idx, row_data) in rows.iter().enumerate() {
        let row = start_row + 1 + row_idx as u32;
        for (col_idx, val) in row_data.as_ref().iter().enumerate() {
            let col = start_col + col_idx as u32;
            let cell_val: CellVal = val.clone().into();
            set_cell(sheet, col, row, &cell_val);
        }
    }
}

/// `count` rows of `[id, "item <id>"]` under an `id | name` header.
pub fn fill_numbered(sheet: &mut Worksheet, count: u32) {
    let rows: Vec<Vec<CellVal>> = (1..=count)
        .map(|i| vec![CellVal::Num(i as f64), CellVal::Text(format!("item {i}"))])
        .collect();
    fill_table(sheet, "A1", &["id", "name"], &rows);
}

pub fn fill_sparse(sheet: &mut Worksheet, cells: &[(&str, CellVal)]) {
    for (cell_ref, val) in cells {
        let (col, row) = parse_cell_ref(cell_ref);
        set_cell(sheet, col, row, val);
    }
}

pub fn highlight(sheet: &mut Worksheet, cell_ref: &str, argb: &str) {
    let (col, row) = parse_cell_ref(cell_ref);
    sheet
        .get_style_mut((col, row))
        .get_fill_mut()
        .get_pattern_fill_mut()
        .set_pattern_type(PatternValues::Solid)
        .get_foreground_color_mut()
        .set_argb(argb);
}

pub fn link(sheet: &mut Worksheet, cell_ref: &str, url: &str) {
    let (col, row) = parse_cell_ref(cell_ref);
    let mut hyperlink = umya_spreadsheet::Hyperlink::default();
    hyperlink.set_url(url);
    sheet.get_cell_mut((col, row)).set_hyperlink(hyperlink);
}

/// Solid fill whose foreground points at theme color slot `theme_index`.
pub fn theme_fill(sheet: &mut Worksheet, cell_ref: &str, theme_index: u32) {
    let (col, row) = parse_cell_ref(cell_ref);
    sheet
        .get_style_mut((col, row))
        .get_fill_mut()
        .get_pattern_fill_mut()
        .set_pattern_type(PatternValues::Solid)
        .get_foreground_color_mut()
        .set_theme_index(theme_index);
}

pub fn set_accent1(book: &mut Spreadsheet, rgb: &str) {
    let mut hex = RgbColorModelHex::default();
    hex.set_val(rgb);
    book.get_theme_mut()
        .get_theme_elements_mut()
        .get_color_scheme_mut()
        .get_accent1_mut()
        .set_rgb_color_model_hex(hex);
}

/// Thin bottom border, centered wrapped text, unlocked and hidden protection
/// and a two-decimal number format on one cell.
pub fn decorate(sheet: &mut Worksheet, cell_ref: &str) {
    let (col, row) = parse_cell_ref(cell_ref);
    let style = sheet.get_style_mut((col, row));
    let bottom = style.get_borders_mut().get_bottom_mut();
    bottom.set_border_style(Border::BORDER_THIN);
    bottom.get_color_mut().set_argb("FF1F4E79");
    let alignment = style.get_alignment_mut();
    alignment.set_horizontal(HorizontalAlignmentValues::Center);
    alignment.set_wrap_text(true);
    let protection = style.get_protection_mut();
    protection.set_locked(false);
    protection.set_hidden(true);
    style
        .get_number_format_mut()
        .set_format_code(NumberingFormat::FORMAT_NUMBER_COMMA_SEPARATED1);
}

/// Rich text made of `runs`; runs flagged `true` are bold.
pub fn rich_text(sheet: &mut Worksheet, cell_ref: &str, runs: &[(&str, bool)]) {
    let (col, row) = parse_cell_ref(cell_ref);
    let mut rich = RichText::default();
    for (text, bold) in runs {
        let mut element = TextElement::default();
        element.set_text(*text);
        element.get_run_properties_mut().set_bold(*bold);
        rich.add_rich_text_elements(element);
    }
    sheet.get_cell_mut((col, row)).set_rich_text(rich);
}
