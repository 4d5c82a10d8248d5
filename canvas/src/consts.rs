//! Shared numeric constants for the canvas crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// Maximum perpendicular distance, in canvas units, at which a line is hit.
pub const LINE_HIT_TOLERANCE: f64 = 10.0;

// ── Input ───────────────────────────────────────────────────────

/// Id given to the provisional shape shown while a gesture is in progress.
/// Never logged or sent.
pub const PREVIEW_SHAPE_ID: &str = "preview";
