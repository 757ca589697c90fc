//! Clamped hazard level arithmetic.
//!
//! Every hazard scalar (heat, smoke, pressure, radiation, stress, dirt)
//! lives in `[0, 100]`. Arithmetic on levels is total: clamping replaces
//! overflow and underflow checks, so the per-turn pipeline never has an
//! error path.

/// Upper bound of every hazard scalar.
pub const LEVEL_MAX: u8 = 100;

/// Clamp a signed intermediate value back into `[0, LEVEL_MAX]`.
pub fn clamp(value: i32) -> u8 {
    value.clamp(0, LEVEL_MAX as i32) as u8
}

/// Add an accumulated gain to a base level, saturating at [`LEVEL_MAX`].
pub fn saturating_gain(base: u8, gain: u32) -> u8 {
    (base as u32 + gain).min(LEVEL_MAX as u32) as u8
}

/// Raise a level by `amount`, saturating at `cap` but never lowering a
/// level already above it.
pub fn raise_capped(level: u8, amount: u8, cap: u8) -> u8 {
    if level >= cap {
        level
    } else {
        level.saturating_add(amount).min(cap)
    }
}
