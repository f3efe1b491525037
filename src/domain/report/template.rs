//! Report template value object

use crate::domain::session::SessionType;

/// A named report section with guidance for the generation model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub guidance: &'static str,
}

/// Sections for an initial advisory session
const INITIAL_SECTIONS: &[Section] = &[
    Section {
        title: "BRIEF DESCRIPTION OF THE BUSINESS AND/OR OWNERS",
        guidance: "Service or product/Short history/Others involved/Special Circumstances/Timeline",
    },
    Section {
        title: "OVERVIEW AND ANALYSIS OF THE CRITICAL PROBLEM",
        guidance: "Assistance requested/Questions answered/identification of other problems to be considered/red flags/ideas brainstormed/resources identified",
    },
    Section {
        title: "RECOMMENDATIONS AND ACTIONS TO BE TAKEN",
        guidance: "Directions given/warnings or cautions/quick lessons taught/resources revealed/ideas floated/websites visited/forms reviewed/referrals to agencies",
    },
    Section {
        title: "PLAN OF ACTION, NEXT STEPS & FOLLOW-UP",
        guidance: "What specifically the client will do and what will the counselor do/Classes enrolled, books checked out, other advisors sought/Websites to visit/Research to do/materials to send/agency contacts to make/materials filed/prep work for next meeting",
    },
];

/// Sections for a follow-up advisory session
const FOLLOW_UP_SECTIONS: &[Section] = &[
    Section {
        title: "ACHIEVEMENT TOWARD GOAL AND/OR OTHER KEY ISSUES",
        guidance: "Achievements based on prior counseling/client activities from their Plan of Action/work-plan, with identification of any additional problems to be considered. Include estimated hours the client spent working in their business toward achievement of specific goals.",
    },
    Section {
        title: "RECOMMENDATIONS AND ACTIONS TO BE TAKEN",
        guidance: "Directions given/warnings or cautions/quick lessons taught/resources revealed/ideas floated/websites visited/forms reviewed/referrals to agencies",
    },
    Section {
        title: "PLAN OF ACTION, NEXT STEPS & FOLLOW-UP",
        guidance: "What specifically the client will do and what will the counselor do/Classes enrolled, books checked out, other advisors sought/Websites to visit/Research to do/materials to send/agency contacts to make/materials filed/prep work for next meeting",
    },
];

/// Fixed report template looked up by session type.
/// Section titles and guidance are part of the external contract; changing
/// them changes the structure of generated reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTemplate {
    session_type: SessionType,
    sections: &'static [Section],
}

impl ReportTemplate {
    /// Look up the template for a session type
    pub const fn for_type(session_type: SessionType) -> Self {
        let sections = match session_type {
            SessionType::Initial => INITIAL_SECTIONS,
            SessionType::FollowUp => FOLLOW_UP_SECTIONS,
        };
        Self {
            session_type,
            sections,
        }
    }

    /// Get the session type this template belongs to
    pub const fn session_type(&self) -> SessionType {
        self.session_type
    }

    /// Get the ordered sections
    pub const fn sections(&self) -> &'static [Section] {
        self.sections
    }
}
