use crate::config::PulseRange;

const PERCENT_MIN: i64 = -100;
const PERCENT_MAX: i64 = 100;

/// Integer linear re-mapping of `x` from one range to another
///
/// Truncates toward zero and does not clamp, so inputs outside
/// `in_min..=in_max` extrapolate. Returns `None` for an empty input range.
pub fn map_range(x: i64, in_min: i64, in_max: i64, out_min: i64, out_max: i64) -> Option<i64> {
    ((x - in_min) * (out_max - out_min))
        .checked_div(in_max - in_min)
        .map(|scaled| scaled + out_min)
}

/// Force magnitudes strictly below `dead_zone` to exactly zero
pub fn apply_dead_zone(value: f32, dead_zone: f32) -> f32 {
    if value > -dead_zone && value < dead_zone {
        0.0
    } else {
        value
    }
}

/// Convert a raw stick pulse into a normalized command
///
/// Pulses inside `range` land in [-1.0, 1.0] with a resolution of 0.01.
/// Pulses outside it are extrapolated, not clamped.
pub fn normalize(raw_us: u32, range: PulseRange, dead_zone: f32) -> f32 {
    let percent = map_range(
        i64::from(raw_us),
        i64::from(range.min_us),
        i64::from(range.max_us),
        PERCENT_MIN,
        PERCENT_MAX,
    )
    .unwrap_or(0);
    apply_dead_zone(percent as f32 / 100.0, dead_zone)
}
