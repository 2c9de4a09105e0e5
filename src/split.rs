use crate::config::SplitConfig;
use crate::errors::{LoadError, SplitError};
use crate::loader::load_document;
use crate::model::Document;
use crate::normalize::normalize_integer_columns;
use crate::planner::{Chunk, PartitionPlan, plan_partition};
use crate::reconstruct::reconstruct_chunk;
use crate::writer::{output_path, write_document};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    /// One-based position, the number substituted into the file name.
    pub index: usize,
    pub path: PathBuf,
    /// Data rows in this file, header excluded.
    pub rows: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    pub source: PathBuf,
    pub sheet: String,
    pub rows_per_file: u32,
    pub data_rows: u32,
    pub files: Vec<OutputFile>,
}

impl SplitReport {
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|file| file.path.clone()).collect()
    }
}

/// Splits the largest sheet of `config.source_path` into one workbook per
/// chunk of `config.rows_per_file` data rows.
///
/// Chunks are built and written on blocking worker threads, at most
/// `config.max_workers` at a time. The first failure stops new chunks from
/// starting; chunks already running finish and their files stay on disk. When
/// several chunks fail, the error of the lowest chunk index is returned.
pub async fn split_workbook(config: &SplitConfig) -> Result<SplitReport, SplitError> {
    config.validate()?;

    let document = tokio::task::spawn_blocking({
        let source = config.source_path.clone();
        move || load_document(&source)
    })
    .await
    .map_err(|e| {
        LoadError::new(&config.source_path, "loader task did not complete").with_source(e)
    })??;

    let plan = plan_partition(&document, config.rows_per_file)?;
    info!(
        source = %config.source_path.display(),
        sheet = %plan.sheet,
        data_rows = plan.data_rows,
        files = plan.chunks.len(),
        "splitting workbook"
    );

    let document = Arc::new(document);
    let plan = Arc::new(plan);
    let shared_config = Arc::new(config.clone());
    let semaphore = Arc::new(Semaphore::new(config.max_workers.max(1)));
    let cancel = CancellationToken::new();
    let mut tasks = JoinSet::new();

    for (offset, chunk) in plan.chunks.iter().copied().enumerate() {
        let index = offset + 1;
        if cancel.is_cancelled() {
            break;
        }
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        if cancel.is_cancelled() {
            debug!(chunk = index, "skipping chunk after earlier failure");
            break;
        }

        let document = Arc::clone(&document);
        let plan = Arc::clone(&plan);
        let config = Arc::clone(&shared_config);
        let cancel = cancel.clone();
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let outcome = process_chunk(&document, &plan, index, chunk, &config);
            if let Err(error) = &outcome {
                warn!(chunk = index, %error, "chunk failed, cancelling remaining chunks");
                cancel.cancel();
            }
            (index, outcome)
        });
    }

    let mut files = Vec::with_capacity(plan.chunks.len());
    let mut failure: Option<(usize, SplitError)> = None;
    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = match joined {
            Ok(done) => done,
            Err(join_error) => std::panic::resume_unwind(join_error.into_panic()),
        };
        match outcome {
            Ok(file) => files.push(file),
            Err(error) => {
                let lower = failure.as_ref().is_none_or(|(seen, _)| index < *seen);
                if lower {
                    failure = Some((index, error));
                }
            }
        }
    }

    if let Some((_, error)) = failure {
        return Err(error);
    }

    files.sort_by_key(|file| file.index);
    Ok(SplitReport {
        source: config.source_path.clone(),
        sheet: plan.sheet.clone(),
        rows_per_file: plan.rows_per_file,
        data_rows: plan.data_rows,
        files,
    })
}

/// Reconstructs, normalizes and writes a single chunk.
pub fn process_chunk(
    document: &Document,
    plan: &PartitionPlan,
    index: usize,
    chunk: Chunk,
    config: &SplitConfig,
) -> Result<OutputFile, SplitError> {
    let mut output = reconstruct_chunk(document, plan, chunk)?;
    if let Some(sheet) = output.sheet_mut(&plan.sheet) {
        normalize_integer_columns(sheet, config.integer_format);
    }

    let path = output_path(
        &config.source_path,
        config.output_dir.as_deref(),
        &config.suffix_template,
        index,
    );
    write_document(&output, &path, index)?;

    info!(chunk = index, rows = chunk.len(), path = %path.display(), "wrote file");
    Ok(OutputFile {
        index,
        path,
        rows: chunk.len(),
    })
}
