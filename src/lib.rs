//! SessionScribe - advisory session recording and report generation CLI
//!
//! This crate records or uploads an advisory session, transcribes it using
//! AssemblyAI, and generates a structured SBDC report using the Anthropic
//! Messages API.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (FFmpeg, AssemblyAI, Anthropic, etc.)
//! - **CLI**: Command-line interface, one-shot pipeline, and interactive shell

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
