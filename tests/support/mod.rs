#![allow(dead_code)]

pub mod builders;

use sheet_splitter::{Document, SplitConfig};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use umya_spreadsheet::Spreadsheet;

pub struct TestWorkspace {
    _dir: TempDir,
    root: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().to_path_buf();
        Self { _dir: dir, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Writes a workbook built by `build` and returns its path. The workbook
    /// starts without sheets.
    pub fn create_workbook<F>(&self, name: &str, build: F) -> PathBuf
    where
        F: FnOnce(&mut Spreadsheet),
    {
        let path = self.path(name);
        let mut book = umya_spreadsheet::new_file_empty_worksheet();
        build(&mut book);
        umya_spreadsheet::writer::xlsx::write(&book, &path).expect("write workbook");
        path
    }

    /// Sorted file names directly under the workspace root.
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.root)
            .expect("read workspace")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    pub fn config(&self, source: &Path, rows_per_file: usize) -> SplitConfig {
        SplitConfig::new(source, rows_per_file, "{number}").with_max_workers(2)
    }
}

pub fn load(path: &Path) -> Document {
    sheet_splitter::loader::load_document(path).expect("load workbook")
}

pub fn open(path: &Path) -> Spreadsheet {
    umya_spreadsheet::reader::xlsx::read(path).expect("read workbook")
}
