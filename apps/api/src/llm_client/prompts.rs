// Shared prompt fragments used by every feature.
// Feature-specific instruction templates live in features/prompts.rs.

/// Header placed above the user's payload. Replace `{label}` with the
/// feature label in upper case.
pub const USER_REQUEST_HEADER: &str = "USER REQUEST FOR {label}:";

/// Closing instruction appended after the user's payload.
pub const RESPONSE_FORMAT_INSTRUCTION: &str = "\
Please provide a comprehensive, professional response tailored specifically for \
competitive debate preparation. Format your response clearly with proper structure \
and actionable insights.";
