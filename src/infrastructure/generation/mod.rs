//! Report generation adapters

mod anthropic;

pub use anthropic::AnthropicReportGenerator;
