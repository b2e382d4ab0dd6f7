//! Output module: where lyrics and the run summary go
//!
//! This module handles:
//! - The [`LyricsSink`] seam the driver writes songs through
//! - Plain-text lyrics files on disk ([`FileSink`])
//! - The run report and its end-of-run summary

mod file_sink;
mod report;
mod traits;

pub use file_sink::{render_song_file, FileSink};
pub use report::{print_report, FailureKind, RecordedFailure, RunReport};
pub use traits::{LyricsSink, OutputError, OutputResult};
