pub mod cli;
pub mod cloner;
pub mod config;
pub mod errors;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod planner;
pub mod reconstruct;
pub mod security;
pub mod split;
pub mod styles;
pub mod writer;

pub use config::{CliArgs, IntegerFormatPolicy, SplitConfig};
pub use errors::{InvalidConfigError, LoadError, SplitError, WriteError};
pub use model::{Cell, CellStyle, CellValue, Document, Hyperlink, Sheet};
pub use planner::{Chunk, PartitionPlan};
pub use split::{OutputFile, SplitReport, split_workbook};
