//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod export;
pub mod generate;
pub mod ports;
pub mod transcribe;

// Re-export use cases
pub use export::{report_filename, ExportError, ExportReportUseCase};
pub use generate::{GenerateCallbacks, GenerateError, GenerateReportUseCase};
pub use transcribe::{
    recording_label, TranscribeCallbacks, TranscribeError, TranscribeSessionUseCase,
};
