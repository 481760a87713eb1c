//! Extracts text and tables from PDF, Word, Excel, PowerPoint and EPUB files
//! and normalizes each document into a `{file_type, content, metadata}` record.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod pipeline;
pub mod record;
pub mod util;

pub use error::{Error, Result};
pub use format::FileType;
pub use pipeline::{process_folder, process_one, Pipeline};
pub use record::{enrich, normalize, Metadata, Record};
