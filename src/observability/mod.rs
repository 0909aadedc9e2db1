//! Tracing export to a local OTLP JSON file.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → FileSpanExporter → memories-otlp.json
//! ```
//!
//! The file lives in the plugin data directory
//! (`~/.local/share/zellij/memories/` on the host) and is rotated with three
//! numbered backups. The filter is the `trace_level` plugin option, `info`
//! by default.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
