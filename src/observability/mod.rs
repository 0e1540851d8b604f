//! OpenTelemetry tracing with file-based OTLP export.
//!
//! `tracing` spans and events are bridged into OpenTelemetry and written as
//! OTLP/JSON lines to a rotating file in the data directory. The plugin runs in
//! a WASI sandbox without network sockets, so a file is the only sink.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → JSON lines
//! ```
//!
//! - File: `<data_dir>/skyconnect-otlp.json`
//! - Rotation at 10 MB, three backups (`.1` to `.3`)
//! - Level: `trace_level` plugin option, default `info`
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`otlp`]: OTLP JSON encoding and the span exporter
//! - [`rotating`]: size-rotated line writer

pub mod init;
pub mod otlp;
pub mod rotating;

pub use init::{init_tracing, TRACE_FILE_NAME};
