use sheet_splitter::CellValue;
use sheet_splitter::model::SheetVisibility;
use sheet_splitter::loader::load_document;
use sheet_splitter::writer::write_document;

mod support;

use support::builders::{self, CellVal};

#[test]
fn loader_reads_values_dates_links_and_layout() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.create_workbook("mixed.xlsx", |book| {
        let sheet = builders::add_sheet(book, "Mixed");
        builders::fill_sparse(
            sheet,
            &[
                ("A1", CellVal::from("title")),
                ("A2", CellVal::Num(42.0)),
                ("B2", CellVal::Date(45292.0)),
                ("C2", CellVal::Bool(true)),
                ("D2", CellVal::from("see docs")),
            ],
        );
        builders::link(sheet, "D2", "https://example.com/docs");
        sheet.get_column_dimension_mut("A").set_width(18.5);
        sheet.add_merge_cells("A1:D1");
    });

    let document = load_document(&source).expect("load");
    let sheet = document.sheet("Mixed").expect("sheet");

    assert_eq!(sheet.cell(2, 1).map(|c| &c.value), Some(&CellValue::Number(42.0)));
    assert_eq!(sheet.cell(2, 2).map(|c| &c.value), Some(&CellValue::Date(45292.0)));
    assert_eq!(sheet.cell(2, 3).map(|c| &c.value), Some(&CellValue::Bool(true)));
    assert_eq!(
        sheet
            .cell(2, 4)
            .and_then(|c| c.hyperlink.as_ref())
            .map(|l| l.url.as_str()),
        Some("https://example.com/docs")
    );
    assert_eq!(sheet.data_row_count(), 1);
    assert_eq!(sheet.merges().len(), 1);
    assert!(sheet.merges()[0].within_row(1));
    let width = sheet.columns().find(|(col, _)| *col == 1).map(|(_, l)| l.width);
    assert_eq!(width, Some(18.5));
}

#[test]
fn written_document_reloads_equal() {
    let workspace = support::TestWorkspace::new();
    let source = workspace.create_workbook("styled.xlsx", |book| {
        let sheet = builders::add_sheet(book, "Data");
        builders::fill_table(
            sheet,
            "A1",
            &["name", "score"],
            &[
                vec![CellVal::from("ada"), CellVal::Num(9.5)],
                vec![CellVal::from("grace"), CellVal::Num(8.0)],
            ],
        );
        builders::highlight(sheet, "B2", "FF00B050");
        builders::theme_fill(sheet, "A3", 5);
        builders::set_accent1(book, "7030A0");
        let notes = builders::add_sheet(book, "Notes");
        builders::rich_text(notes, "A1", &[("draft", true), (" only", false)]);
        notes.get_row_dimension_mut(&1).set_height(33.0).set_custom_height(true);
        notes.set_state(umya_spreadsheet::SheetStateValues::Hidden);
    });

    let original = load_document(&source).expect("load");
    let copy = workspace.path("copy.xlsx");
    write_document(&original, &copy, 1).expect("write");
    let reloaded = load_document(&copy).expect("reload");

    assert_eq!(reloaded.sheet_names(), vec!["Data", "Notes"]);
    let notes = reloaded.sheet("Notes").expect("notes");
    assert_eq!(notes.visibility(), SheetVisibility::Hidden);
    assert_eq!(notes.row_layout(1).map(|r| r.height), Some(33.0));
    assert!(matches!(notes.cell(1, 1).map(|c| &c.value), Some(CellValue::RichText(_))));
    assert_eq!(reloaded, original);
}

#[test]
fn directory_path_is_not_loadable() {
    let workspace = support::TestWorkspace::new();
    let err = load_document(workspace.root()).unwrap_err();
    assert_eq!(err.path(), workspace.root());
}
