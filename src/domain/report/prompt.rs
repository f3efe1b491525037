//! Report prompt value object

use super::template::ReportTemplate;

/// Preamble for every report generation request
const PREAMBLE: &str = "You are an SBDC (Small Business Development Center) assistant that helps advisors create structured session notes.";

/// System instruction sent with every generation call
const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant for SBDC advisors who creates detailed session notes in the required format.";

/// Value object representing the complete prompt for report generation.
/// Construction is pure and deterministic: identical transcript and template
/// always produce byte-identical content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPrompt {
    content: String,
}

impl ReportPrompt {
    /// Build a report prompt from a transcript and a template
    pub fn build(transcript: &str, template: &ReportTemplate) -> Self {
        let mut content = format!(
            "{}\n\nBased on the following transcript of a session between an SBDC advisor and a client, please generate a report using the {} template.\n\nTRANSCRIPT:\n{}\n\nPlease format the report with the following sections:\n\n",
            PREAMBLE,
            template.session_type().label(),
            transcript
        );

        for section in template.sections() {
            content.push_str(section.title);
            content.push_str(": \n");
            content.push_str(section.guidance);
            content.push_str("\n\n");
        }

        Self { content }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the content
    pub fn into_content(self) -> String {
        self.content
    }

    /// The fixed system instruction for the generation service
    pub const fn system_instruction() -> &'static str {
        SYSTEM_INSTRUCTION
    }
}
