//! Logging infrastructure: structured proceedings logging.
//!
//! Provides [`JsonlProceedingsLogger`], a JSONL file writer that implements
//! the [`ProceedingsLogger`](gavel_application::ProceedingsLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlProceedingsLogger;
