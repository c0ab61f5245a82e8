//! Volume values and clamping

/// Sound volume in percent, always in `0..=100`.
pub type Volume = u8;

pub const MIN_VOLUME: Volume = 0;
pub const MAX_VOLUME: Volume = 100;

/// Volume used whenever the stored setting cannot be read.
pub const DEFAULT_VOLUME: Volume = MAX_VOLUME;

/// Clamps any integer to a valid volume.
pub fn clamp_volume(value: i64) -> Volume {
    value.max(MIN_VOLUME as i64).min(MAX_VOLUME as i64) as Volume
}

/// Clamps a JSON number to a valid volume.
///
/// Fractional values are truncated toward zero. `NaN` gives 0.
pub fn clamp_volume_f64(value: f64) -> Volume {
    if value.is_nan() {
        return MIN_VOLUME;
    }
    // `as` saturates infinities to i64 bounds
    clamp_volume(value.trunc() as i64)
}

/// Clamps a `serde_json::Number`, whatever its internal representation.
pub fn clamp_volume_number(value: &serde_json::Number) -> Volume {
    if let Some(v) = value.as_i64() {
        clamp_volume(v)
    } else if value.is_u64() {
        // larger than i64::MAX
        MAX_VOLUME
    } else {
        clamp_volume_f64(value.as_f64().unwrap_or(f64::NAN))
    }
}

/// Parses a volume stored as a decimal string.
///
/// Returns `None` for anything that is not a number. Surrounding spaces
/// are accepted, out of range values are clamped.
pub fn parse_volume(value: &str) -> Option<Volume> {
    let trimmed = value.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(clamp_volume(v));
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(clamp_volume_f64(v)),
        _ => None,
    }
}
