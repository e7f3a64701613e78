//! Fixed measurement scale shared by the graph, the level bar and the dial.

/// Bottom of the display scale (dBA)
pub const MIN_DB: f64 = 0.0;
/// Top of the display scale (dBA)
pub const MAX_DB: f64 = 120.0;
pub const DB_RANGE: f64 = MAX_DB - MIN_DB;

/// Degrees of dial rotation per percent of scale (360° at 100%)
pub const DEGREES_PER_PERCENT: f64 = 3.6;

/// Clamp a level into `[MIN_DB, MAX_DB]`.
///
/// A NaN level lands on `MIN_DB`.
pub fn clamp_db(db: f64) -> f64 {
    db.max(MIN_DB).min(MAX_DB)
}

/// Map a level onto `[0, 1]` after clamping.
pub fn normalize(db: f64) -> f64 {
    (clamp_db(db) - MIN_DB) / DB_RANGE
}

/// Map a level onto `[0, 100]` after clamping.
pub fn percentage(db: f64) -> f64 {
    normalize(db) * 100.0
}

/// Dial rotation in degrees for a percentage of scale.
pub fn gauge_rotation(percent: f64) -> f64 {
    percent * DEGREES_PER_PERCENT
}
