use crate::errors::InvalidConfigError;
use crate::security::validate_suffix_template;
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub use crate::normalize::IntegerFormatPolicy;

pub const DEFAULT_ROWS_PER_FILE: usize = 1000;
pub const DEFAULT_SUFFIX_TEMPLATE: &str = "{number}";
const MAX_DEFAULT_WORKERS: usize = 8;
const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx"];

/// Everything one split run needs. Built once and handed to
/// [`crate::split_workbook`]; the pipeline never mutates it.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub source_path: PathBuf,
    pub rows_per_file: usize,
    pub suffix_template: String,
    /// Directory for output files. `None` writes next to the source.
    pub output_dir: Option<PathBuf>,
    pub max_workers: usize,
    pub integer_format: IntegerFormatPolicy,
}

impl SplitConfig {
    pub fn new(
        source_path: impl Into<PathBuf>,
        rows_per_file: usize,
        suffix_template: impl Into<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            rows_per_file,
            suffix_template: suffix_template.into(),
            output_dir: None,
            max_workers: default_workers(),
            integer_format: IntegerFormatPolicy::default(),
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers.max(1);
        self
    }

    pub fn with_integer_format(mut self, policy: IntegerFormatPolicy) -> Self {
        self.integer_format = policy;
        self
    }

    /// Checks the settings that can be judged without opening the workbook.
    /// A missing source file is reported later by the loader.
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        if self.rows_per_file == 0 {
            return Err(
                InvalidConfigError::new("rows per file must be a positive integer")
                    .with_field("rows_per_file"),
            );
        }

        let extension = self
            .source_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(InvalidConfigError::new(format!(
                "source {:?} does not match supported extensions {:?}",
                self.source_path, SUPPORTED_EXTENSIONS
            ))
            .with_field("source_path"));
        }

        validate_suffix_template(&self.suffix_template)?;

        if let Some(dir) = self.output_dir.as_ref() {
            if !dir.is_dir() {
                return Err(InvalidConfigError::new(format!(
                    "output directory {dir:?} does not exist or is not a directory"
                ))
                .with_field("output_dir"));
            }
        }

        if self.max_workers == 0 {
            return Err(
                InvalidConfigError::new("max workers must be at least 1").with_field("max_workers"),
            );
        }
        Ok(())
    }

    /// Merges command-line flags over an optional config file over defaults,
    /// then validates the result.
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            source: cli_source,
            rows: cli_rows,
            suffix: cli_suffix,
            output_dir: cli_output_dir,
            workers: cli_workers,
            integer_format: cli_integer_format,
            config,
            ..
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            source_path: file_source,
            rows_per_file: file_rows,
            suffix_template: file_suffix,
            output_dir: file_output_dir,
            max_workers: file_workers,
            integer_format: file_integer_format,
        } = file_config;

        let source_path = cli_source
            .or(file_source)
            .context("no source workbook given (pass FILE or set source_path in the config file)")?;

        let rows = cli_rows
            .or(file_rows)
            .unwrap_or(DEFAULT_ROWS_PER_FILE as i64);
        let rows_per_file = rows_from_signed(rows)?;

        let suffix_template = cli_suffix
            .or(file_suffix)
            .unwrap_or_else(|| DEFAULT_SUFFIX_TEMPLATE.to_string());

        let max_workers = cli_workers
            .or(file_workers)
            .unwrap_or_else(default_workers)
            .max(1);

        let integer_format = cli_integer_format
            .or(file_integer_format)
            .unwrap_or_default();

        let config = Self {
            source_path,
            rows_per_file,
            suffix_template,
            output_dir: cli_output_dir.or(file_output_dir),
            max_workers,
            integer_format,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Negative counts typed on the command line are a configuration error, not a
/// parse error, so they get the same reporting as zero.
fn rows_from_signed(rows: i64) -> Result<usize, InvalidConfigError> {
    usize::try_from(rows)
        .ok()
        .filter(|rows| *rows > 0)
        .ok_or_else(|| {
            InvalidConfigError::new(format!("rows per file must be a positive integer, got {rows}"))
                .with_field("rows_per_file")
        })
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(1, MAX_DEFAULT_WORKERS)
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "sheet-splitter",
    about = "Split one sheet of an xlsx workbook into fixed-size row chunks",
    version
)]
pub struct CliArgs {
    #[arg(value_name = "FILE", help = "Source workbook (.xlsx)")]
    pub source: Option<PathBuf>,

    #[arg(
        long,
        env = "SHEET_SPLITTER_ROWS",
        value_name = "N",
        allow_negative_numbers = true,
        help = "Data rows per output file, excluding the header (default: 1000)"
    )]
    pub rows: Option<i64>,

    #[arg(
        long,
        env = "SHEET_SPLITTER_SUFFIX",
        value_name = "TEMPLATE",
        help = "File name suffix; {number} becomes the zero-padded chunk index"
    )]
    pub suffix: Option<String>,

    #[arg(
        long,
        env = "SHEET_SPLITTER_OUTPUT_DIR",
        value_name = "DIR",
        help = "Write output files here instead of next to the source"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "SHEET_SPLITTER_WORKERS",
        value_name = "N",
        help = "Chunks written concurrently (default: available cores, at most 8)"
    )]
    pub workers: Option<usize>,

    #[arg(
        long,
        env = "SHEET_SPLITTER_INTEGER_FORMAT",
        value_enum,
        value_name = "POLICY",
        help = "Integer column formatting: override, general-only, or off"
    )]
    pub integer_format: Option<IntegerFormatPolicy>,

    #[arg(
        long,
        env = "SHEET_SPLITTER_CONFIG",
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the report as single-line JSON")]
    pub compact: bool,

    #[arg(long, short = 'q', help = "Only log warnings and errors")]
    pub quiet: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    source_path: Option<PathBuf>,
    rows_per_file: Option<i64>,
    suffix_template: Option<String>,
    output_dir: Option<PathBuf>,
    max_workers: Option<usize>,
    integer_format: Option<IntegerFormatPolicy>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
