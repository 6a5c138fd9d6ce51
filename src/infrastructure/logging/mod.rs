//! Structured logging with tracing: stderr plus optional rolling JSON files

pub mod logger;

pub use logger::LoggerImpl;
