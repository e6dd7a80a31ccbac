// SPDX-License-Identifier: MIT

//! Level and rank resolution from cumulative XP.
//!
//! The level curve is an inverse power law: reaching level `L` costs
//! `floor(50 * (L-1)^(1/0.6))` XP, so each level is progressively more
//! expensive. The closed-form inversion and the forward floor are both
//! evaluated in floating point and can disagree right at a boundary,
//! so the resolved level is clamped against the forward curve instead
//! of trusting either formula alone.

/// XP divisor of the level curve.
const XP_SCALE: f64 = 50.0;
/// Exponent of the level-from-XP inversion.
const CURVE_EXPONENT: f64 = 0.6;

/// Hard ceiling on resolvable levels, far beyond any reachable
/// progression. Keeps the inversion total for arbitrarily large XP:
/// without it the float-to-int cast saturates and the clamp walk
/// below has no upper bound to stop at.
pub const MAX_LEVEL: u32 = 100_000;

/// Resolved level with the XP boundaries of the current bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    pub level: u32,
    /// XP required to have reached `level`
    pub prev_level_xp: u64,
    /// XP required to reach `level + 1`
    pub next_level_xp: u64,
}

/// XP required to reach a level. `xp_floor(1) == 0`.
pub fn xp_floor(level: u32) -> u64 {
    if level <= 1 {
        return 0;
    }
    (XP_SCALE * f64::from(level - 1).powf(1.0 / CURVE_EXPONENT)).floor() as u64
}

/// Map cumulative XP to a level and its bracket boundaries.
///
/// Guarantees `xp_floor(level) <= total_xp < xp_floor(level + 1)` for
/// every non-negative input below `xp_floor(MAX_LEVEL + 1)`; anything
/// beyond that pins to `MAX_LEVEL` (and progress clamps to 1).
pub fn resolve(total_xp: f64) -> LevelInfo {
    let total_xp = total_xp.max(0.0);

    let mut level = if total_xp > 0.0 {
        let inverted = (total_xp / XP_SCALE).powf(CURVE_EXPONENT).floor();
        // Clamp before the cast and the +1: very large XP must not
        // saturate the cast or overflow the increment.
        if inverted >= f64::from(MAX_LEVEL - 1) {
            MAX_LEVEL
        } else {
            inverted as u32 + 1
        }
    } else {
        1
    };

    // Re-anchor against the forward curve; powf rounding can put the
    // closed-form inversion off by one at bracket boundaries.
    while level > 1 && total_xp < xp_floor(level) as f64 {
        level -= 1;
    }
    while level < MAX_LEVEL && total_xp >= xp_floor(level + 1) as f64 {
        level += 1;
    }

    LevelInfo {
        level,
        prev_level_xp: xp_floor(level),
        next_level_xp: xp_floor(level + 1),
    }
}

/// Fraction of the current level bracket completed, clamped to [0, 1].
///
/// A degenerate bracket (possible only around the XP=0 edge of the
/// floor arithmetic) reports 0 rather than dividing by zero.
pub fn progress(total_xp: f64, info: LevelInfo) -> f64 {
    let span = info.next_level_xp.saturating_sub(info.prev_level_xp);
    if span == 0 {
        return 0.0;
    }
    let frac = (total_xp - info.prev_level_xp as f64) / span as f64;
    if frac.is_nan() {
        return 0.0;
    }
    frac.clamp(0.0, 1.0)
}

/// Display title for a level bracket.
pub fn rank_title(level: u32) -> &'static str {
    match level {
        50.. => "Grandmaster",
        40.. => "Arch-Scholar",
        30.. => "Polymath",
        20.. => "Expert",
        10.. => "Apprentice",
        _ => "Novice",
    }
}
