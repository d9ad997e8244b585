//! Input validation helpers
//!
//! Centralized text length limits for the booking form.

// ── Text length limits ──────────────────────────────────────────────

/// Customer names
pub const MAX_NAME_LEN: usize = 200;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 100;

/// Booking notes
pub const MAX_NOTE_LEN: usize = 500;

// ── Helpers ─────────────────────────────────────────────────────────

/// A required text field counts as missing when empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Length check in characters (not bytes), so CJK names are not penalised.
pub fn exceeds(value: &str, max_len: usize) -> bool {
    value.chars().count() > max_len
}

/// Normalise an optional note: trimmed, blank becomes `None`.
pub fn normalize_note(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
