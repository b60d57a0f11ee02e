//! Easing curves
//!
//! Every curve maps normalized time to progress. Callers clamp to `[0, 1]`
//! in the enter/exit regime, but the functions are total over `f32` and
//! never panic outside that range. Overshooting curves leave `[0, 1]`.

use std::f32::consts::PI;

/// Overshoot constant for the back curves
const BACK_OVERSHOOT: f32 = 1.7;

const BOUNCE_N: f32 = 7.5625;
const BOUNCE_D: f32 = 2.75;

/// Named easing curve; the envelope curves select through this
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutBack,
    EaseInBack,
    EaseOutElastic,
    EaseOutBounce,
}

impl Easing {
    /// Apply the curve to `t`
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => linear(t),
            Easing::EaseInQuad => ease_in_quad(t),
            Easing::EaseOutBack => ease_out_back(t),
            Easing::EaseInBack => ease_in_back(t),
            Easing::EaseOutElastic => ease_out_elastic(t),
            Easing::EaseOutBounce => ease_out_bounce(t),
        }
    }
}

pub fn linear(t: f32) -> f32 {
    t
}

pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}

/// Cubic overshoot past 1 before settling
pub fn ease_out_back(t: f32) -> f32 {
    let c = BACK_OVERSHOOT;
    let u = t - 1.0;
    1.0 + (c + 1.0) * u * u * u + c * u * u
}

/// Pulls back below 0 before accelerating to 1
pub fn ease_in_back(t: f32) -> f32 {
    let c = BACK_OVERSHOOT;
    t * t * ((c + 1.0) * t - c)
}

/// Decaying sinusoidal overshoot; pinned to exactly 0 and 1 at the ends
pub fn ease_out_elastic(t: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    if t == 1.0 {
        return 1.0;
    }
    2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * (2.0 * PI) / 3.0).sin() + 1.0
}

/// Four-segment piecewise quadratic bounce
pub fn ease_out_bounce(t: f32) -> f32 {
    let n = BOUNCE_N;
    let d = BOUNCE_D;
    if t < 1.0 / d {
        n * t * t
    } else if t < 2.0 / d {
        let u = t - 1.5 / d;
        n * u * u + 0.75
    } else if t < 2.5 / d {
        let u = t - 2.25 / d;
        n * u * u + 0.9375
    } else {
        let u = t - 2.625 / d;
        n * u * u + 0.984375
    }
}
