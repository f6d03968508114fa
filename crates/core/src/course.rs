//! Canonical course definition for FREE_INTRO_AI_V0.
//!
//! The section vocabulary is a fixed, versioned constant. It is enforced
//! at the write boundary: an unknown section ID is rejected before any
//! row is persisted, never coerced or silently dropped.

use crate::error::CoreError;

/// Course identifier for the free intro course.
pub const COURSE_ID: &str = "FREE_INTRO_AI_V0";

/// Phase 1 sections.
pub const P1_S1: &str = "P1_S1";
pub const P1_S2: &str = "P1_S2";
pub const P1_S3: &str = "P1_S3";
/// Phase 2 sections.
pub const P2_S1: &str = "P2_S1";
pub const P2_S2: &str = "P2_S2";
pub const P2_S3: &str = "P2_S3";
/// Phase 3 sections.
pub const P3_S1: &str = "P3_S1";
pub const P3_S2: &str = "P3_S2";
pub const P3_S3: &str = "P3_S3";

/// All valid section IDs, grouped 3 phases x 3 sections. Do not add,
/// remove, or rename entries without versioning the course.
pub const SECTION_IDS: &[&str] = &[
    P1_S1, P1_S2, P1_S3, P2_S1, P2_S2, P2_S3, P3_S1, P3_S2, P3_S3,
];

/// Denominator for completion percentage on the reference course.
pub const TOTAL_SECTIONS: i32 = 9;

/// Returns `true` if `section_id` is a canonical section for FREE_INTRO_AI_V0.
pub fn is_valid_section_id(section_id: &str) -> bool {
    SECTION_IDS.contains(&section_id)
}

/// Validate that a section ID is one of the canonical sections.
pub fn validate_section_id(section_id: &str) -> Result<(), CoreError> {
    if is_valid_section_id(section_id) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid section_id: '{section_id}'. Valid sections: {}",
            SECTION_IDS.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
