//! Three-phase motion envelope
//!
//! A shape's normalized lifetime `t ∈ [0, 1]` is split by two thresholds:
//!
//! ```text
//! 0 ─── enter ───▶ enter_end ─── hold ───▶ exit_start ─── exit ───▶ 1
//! ```
//!
//! - **Enter** (`t < enter_end`): an [`EnterKind`] curve driven by
//!   `te = t / enter_end`.
//! - **Hold** (`enter_end ≤ t ≤ exit_start`): identity, modulated by a
//!   [`HoldMotion`] that runs on wall-clock time so shapes never move in
//!   lockstep.
//! - **Exit** (`t > exit_start`): an [`ExitKind`] curve driven by
//!   `te = (t - exit_start) / (1 - exit_start)`.
//!
//! Each kind resolves to a plain `fn` through a lookup ([`EnterKind::curve`],
//! [`ExitKind::curve`]), so every curve can be tested on its own. Phases
//! never blend; continuity at the thresholds comes from the curves
//! themselves ending (enter) and starting (exit) at identity.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tessel_core::{Point, Size, Vec2};

use crate::easing::Easing;

/// Default enter threshold when a shape does not specify one
pub const DEFAULT_ENTER_END: f32 = 0.15;
/// Default exit threshold when a shape does not specify one
pub const DEFAULT_EXIT_START: f32 = 0.78;
/// Rotation rate for rotating hold motions without an explicit speed
pub const DEFAULT_ROTATION_SPEED: f32 = 0.04;

/// Pixels per unit of drift velocity over the whole hold window
const DRIFT_DISTANCE: f32 = 120.0;

// ─────────────────────────────────────────────────────────────────────────────
// Phase Transforms
// ─────────────────────────────────────────────────────────────────────────────

/// The contribution of one phase curve to a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseTransform {
    pub scale: f32,
    pub offset: Vec2,
    pub rotation: f32,
    pub opacity: f32,
}

impl PhaseTransform {
    pub const IDENTITY: PhaseTransform = PhaseTransform {
        scale: 1.0,
        offset: Vec2::ZERO,
        rotation: 0.0,
        opacity: 1.0,
    };

    fn scaled(scale: f32) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    fn spun(scale: f32, rotation: f32) -> Self {
        Self {
            scale,
            rotation,
            ..Self::IDENTITY
        }
    }

    fn shifted(dx: f32, dy: f32) -> Self {
        Self {
            offset: Vec2::new(dx, dy),
            ..Self::IDENTITY
        }
    }

    fn faded(self, te: f32) -> Self {
        Self {
            opacity: (1.0 - te).clamp(0.0, 1.0),
            ..self
        }
    }
}

impl Default for PhaseTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A phase curve: local progress and viewport in, phase transform out
pub type PhaseCurve = fn(f32, Size) -> PhaseTransform;

// ─────────────────────────────────────────────────────────────────────────────
// Enter Kinds
// ─────────────────────────────────────────────────────────────────────────────

/// How a shape arrives
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnterKind {
    #[default]
    Scale,
    Bounce,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    Zoom,
    Rotate,
    StretchH,
    StretchV,
    Elastic,
    FromCenter,
    Diagonal,
    WhipIn,
    FlipIn,
    SlamDown,
    Burst,
}

impl EnterKind {
    pub const ALL: [EnterKind; 17] = [
        EnterKind::Scale,
        EnterKind::Bounce,
        EnterKind::SlideLeft,
        EnterKind::SlideRight,
        EnterKind::SlideUp,
        EnterKind::SlideDown,
        EnterKind::Zoom,
        EnterKind::Rotate,
        EnterKind::StretchH,
        EnterKind::StretchV,
        EnterKind::Elastic,
        EnterKind::FromCenter,
        EnterKind::Diagonal,
        EnterKind::WhipIn,
        EnterKind::FlipIn,
        EnterKind::SlamDown,
        EnterKind::Burst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EnterKind::Scale => "scale",
            EnterKind::Bounce => "bounce",
            EnterKind::SlideLeft => "slide-left",
            EnterKind::SlideRight => "slide-right",
            EnterKind::SlideUp => "slide-up",
            EnterKind::SlideDown => "slide-down",
            EnterKind::Zoom => "zoom",
            EnterKind::Rotate => "rotate",
            EnterKind::StretchH => "stretch-h",
            EnterKind::StretchV => "stretch-v",
            EnterKind::Elastic => "elastic",
            EnterKind::FromCenter => "from-center",
            EnterKind::Diagonal => "diagonal",
            EnterKind::WhipIn => "whip-in",
            EnterKind::FlipIn => "flip-in",
            EnterKind::SlamDown => "slam-down",
            EnterKind::Burst => "burst",
        }
    }

    /// Resolve to the curve that drives this kind
    pub fn curve(self) -> PhaseCurve {
        match self {
            EnterKind::Scale => enter::scale,
            EnterKind::Bounce => enter::bounce,
            EnterKind::SlideLeft => enter::slide_left,
            EnterKind::SlideRight => enter::slide_right,
            EnterKind::SlideUp => enter::slide_up,
            EnterKind::SlideDown => enter::slide_down,
            EnterKind::Zoom => enter::zoom,
            EnterKind::Rotate => enter::rotate,
            EnterKind::StretchH | EnterKind::StretchV => enter::stretch,
            EnterKind::Elastic | EnterKind::Burst => enter::elastic,
            EnterKind::FromCenter => enter::grow,
            EnterKind::Diagonal => enter::diagonal,
            EnterKind::WhipIn => enter::whip_in,
            EnterKind::FlipIn => enter::flip_in,
            EnterKind::SlamDown => enter::slam_down,
        }
    }
}

mod enter {
    use super::*;

    pub(super) fn scale(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::scaled(Easing::EaseOutBack.apply(te))
    }

    pub(super) fn bounce(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::scaled(Easing::EaseOutBounce.apply(te))
    }

    pub(super) fn slide_left(te: f32, vp: Size) -> PhaseTransform {
        PhaseTransform::shifted(-vp.width * 0.3 * (1.0 - te), 0.0)
    }

    pub(super) fn slide_right(te: f32, vp: Size) -> PhaseTransform {
        PhaseTransform::shifted(vp.width * 0.3 * (1.0 - te), 0.0)
    }

    pub(super) fn slide_up(te: f32, vp: Size) -> PhaseTransform {
        PhaseTransform::shifted(0.0, -vp.height * 0.3 * (1.0 - te))
    }

    pub(super) fn slide_down(te: f32, vp: Size) -> PhaseTransform {
        PhaseTransform::shifted(0.0, vp.height * 0.3 * (1.0 - te))
    }

    pub(super) fn zoom(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::scaled(Easing::EaseInQuad.apply(te))
    }

    pub(super) fn rotate(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::spun(te, (1.0 - te) * PI * 2.0)
    }

    pub(super) fn stretch(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::scaled(0.1 + 0.9 * te)
    }

    pub(super) fn elastic(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::scaled(Easing::EaseOutElastic.apply(te))
    }

    pub(super) fn grow(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::scaled(Easing::Linear.apply(te))
    }

    pub(super) fn diagonal(te: f32, vp: Size) -> PhaseTransform {
        PhaseTransform {
            scale: te,
            offset: Vec2::new(
                -vp.width * 0.2 * (1.0 - te),
                -vp.height * 0.2 * (1.0 - te),
            ),
            ..PhaseTransform::IDENTITY
        }
    }

    pub(super) fn whip_in(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::spun(te, (1.0 - te) * PI)
    }

    pub(super) fn flip_in(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::spun(te, (1.0 - te) * PI * 2.0)
    }

    pub(super) fn slam_down(te: f32, vp: Size) -> PhaseTransform {
        PhaseTransform {
            scale: Easing::EaseOutBounce.apply(te),
            offset: Vec2::new(0.0, -vp.height * 0.4 * (1.0 - te)),
            ..PhaseTransform::IDENTITY
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Exit Kinds
// ─────────────────────────────────────────────────────────────────────────────

/// How a shape leaves. Every kind ends invisible: either its scale reaches
/// zero or it fades out while it travels or grows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitKind {
    #[default]
    Scale,
    BounceOut,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    ZoomOut,
    RotateOut,
    Explode,
    Implode,
    Collapse,
    FlyRight,
    FlyUp,
    FlyLeft,
    SpinOut,
    StretchOut,
    WhipOut,
    FlipOut,
    SlamUp,
}

impl ExitKind {
    pub const ALL: [ExitKind; 19] = [
        ExitKind::Scale,
        ExitKind::BounceOut,
        ExitKind::SlideLeft,
        ExitKind::SlideRight,
        ExitKind::SlideUp,
        ExitKind::SlideDown,
        ExitKind::ZoomOut,
        ExitKind::RotateOut,
        ExitKind::Explode,
        ExitKind::Implode,
        ExitKind::Collapse,
        ExitKind::FlyRight,
        ExitKind::FlyUp,
        ExitKind::FlyLeft,
        ExitKind::SpinOut,
        ExitKind::StretchOut,
        ExitKind::WhipOut,
        ExitKind::FlipOut,
        ExitKind::SlamUp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExitKind::Scale => "scale",
            ExitKind::BounceOut => "bounce-out",
            ExitKind::SlideLeft => "slide-left",
            ExitKind::SlideRight => "slide-right",
            ExitKind::SlideUp => "slide-up",
            ExitKind::SlideDown => "slide-down",
            ExitKind::ZoomOut => "zoom-out",
            ExitKind::RotateOut => "rotate-out",
            ExitKind::Explode => "explode",
            ExitKind::Implode => "implode",
            ExitKind::Collapse => "collapse",
            ExitKind::FlyRight => "fly-right",
            ExitKind::FlyUp => "fly-up",
            ExitKind::FlyLeft => "fly-left",
            ExitKind::SpinOut => "spin-out",
            ExitKind::StretchOut => "stretch-out",
            ExitKind::WhipOut => "whip-out",
            ExitKind::FlipOut => "flip-out",
            ExitKind::SlamUp => "slam-up",
        }
    }

    /// Resolve to the curve that drives this kind
    pub fn curve(self) -> PhaseCurve {
        match self {
            ExitKind::Scale => exit::scale,
            ExitKind::BounceOut => exit::bounce_out,
            ExitKind::SlideLeft => exit::slide_left,
            ExitKind::SlideRight => exit::slide_right,
            ExitKind::SlideUp => exit::slide_up,
            ExitKind::SlideDown => exit::slide_down,
            ExitKind::ZoomOut => exit::zoom_out,
            ExitKind::RotateOut => exit::rotate_out,
            ExitKind::Explode => exit::explode,
            ExitKind::Implode => exit::shrink,
            ExitKind::Collapse => exit::collapse,
            ExitKind::FlyRight => exit::fly_right,
            ExitKind::FlyUp => exit::fly_up,
            ExitKind::FlyLeft => exit::fly_left,
            ExitKind::SpinOut => exit::spin_out,
            ExitKind::StretchOut => exit::stretch_out,
            ExitKind::WhipOut => exit::whip_out,
            ExitKind::FlipOut => exit::flip_out,
            ExitKind::SlamUp => exit::slam_up,
        }
    }
}

mod exit {
    use super::*;

    pub(super) fn scale(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::scaled(1.0 - Easing::EaseInBack.apply(te))
    }

    pub(super) fn bounce_out(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::scaled(1.0 - Easing::EaseOutBounce.apply(te))
    }

    pub(super) fn slide_left(te: f32, vp: Size) -> PhaseTransform {
        PhaseTransform::shifted(-vp.width * 0.4 * te, 0.0).faded(te)
    }

    pub(super) fn slide_right(te: f32, vp: Size) -> PhaseTransform {
        PhaseTransform::shifted(vp.width * 0.4 * te, 0.0).faded(te)
    }

    pub(super) fn slide_up(te: f32, vp: Size) -> PhaseTransform {
        PhaseTransform::shifted(0.0, -vp.height * 0.4 * te).faded(te)
    }

    pub(super) fn slide_down(te: f32, vp: Size) -> PhaseTransform {
        PhaseTransform::shifted(0.0, vp.height * 0.4 * te).faded(te)
    }

    pub(super) fn zoom_out(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::scaled(1.0 + te * 0.5).faded(te)
    }

    pub(super) fn rotate_out(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::spun(1.0 - te, te * PI * 3.0)
    }

    pub(super) fn explode(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::spun(1.0 + te * 0.8, te * PI).faded(te)
    }

    pub(super) fn shrink(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::scaled(1.0 - te)
    }

    pub(super) fn collapse(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::scaled((1.0 - te * 1.5).max(0.0))
    }

    fn fly(te: f32, dx: f32, dy: f32) -> PhaseTransform {
        PhaseTransform {
            scale: 1.0 - te * 0.3,
            offset: Vec2::new(dx * te, dy * te),
            ..PhaseTransform::IDENTITY
        }
        .faded(te)
    }

    pub(super) fn fly_right(te: f32, vp: Size) -> PhaseTransform {
        fly(te, vp.width * 0.5, 0.0)
    }

    pub(super) fn fly_up(te: f32, vp: Size) -> PhaseTransform {
        fly(te, 0.0, -vp.height * 0.5)
    }

    pub(super) fn fly_left(te: f32, vp: Size) -> PhaseTransform {
        fly(te, -vp.width * 0.5, 0.0)
    }

    pub(super) fn spin_out(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::spun(1.0 - te, te * PI * 4.0)
    }

    pub(super) fn stretch_out(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::scaled(1.0 + te * 0.5).faded(te)
    }

    pub(super) fn whip_out(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::spun(1.0 - te, te * PI * 2.0)
    }

    pub(super) fn flip_out(te: f32, _: Size) -> PhaseTransform {
        PhaseTransform::spun(1.0 - te, te * PI * 3.0)
    }

    pub(super) fn slam_up(te: f32, vp: Size) -> PhaseTransform {
        PhaseTransform {
            scale: 1.0 - te,
            offset: Vec2::new(0.0, vp.height * 0.5 * te),
            ..PhaseTransform::IDENTITY
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hold Motion
// ─────────────────────────────────────────────────────────────────────────────

/// Idle motion while a shape is fully on screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoldMotion {
    #[default]
    None,
    /// Slow, small scale oscillation
    Breathe,
    /// Breathe plus continuous rotation
    BreatheRot,
    /// Faster, larger scale oscillation
    Pulse,
    /// Pulse plus drift
    PulseDrift,
    /// Small XY wander
    Drift,
    /// Circular XY path
    Orbit,
    /// Vertical bob with a slight scale change
    Float,
    /// Scale oscillation phase-offset by registry slot
    Wave,
    /// Linear growth across the hold window
    Expand,
    /// Continuous rotation plus a slight pulse
    Radiate,
    /// Continuous rotation only
    Spin,
}

impl HoldMotion {
    pub const ALL: [HoldMotion; 12] = [
        HoldMotion::None,
        HoldMotion::Breathe,
        HoldMotion::BreatheRot,
        HoldMotion::Pulse,
        HoldMotion::PulseDrift,
        HoldMotion::Drift,
        HoldMotion::Orbit,
        HoldMotion::Float,
        HoldMotion::Wave,
        HoldMotion::Expand,
        HoldMotion::Radiate,
        HoldMotion::Spin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HoldMotion::None => "none",
            HoldMotion::Breathe => "breathe",
            HoldMotion::BreatheRot => "breathe-rot",
            HoldMotion::Pulse => "pulse",
            HoldMotion::PulseDrift => "pulse-drift",
            HoldMotion::Drift => "drift",
            HoldMotion::Orbit => "orbit",
            HoldMotion::Float => "float",
            HoldMotion::Wave => "wave",
            HoldMotion::Expand => "expand",
            HoldMotion::Radiate => "radiate",
            HoldMotion::Spin => "spin",
        }
    }

    /// Whether this motion adds continuous rotation
    pub fn rotates(self) -> bool {
        matches!(
            self,
            HoldMotion::BreatheRot | HoldMotion::Radiate | HoldMotion::Spin
        )
    }

    /// Sample the motion.
    ///
    /// `clock` is wall-clock seconds, `slot` the shape's registry position,
    /// `progress` how far through the hold window the shape is (0..=1).
    pub fn sample(self, clock: f32, slot: usize, progress: f32, rotation_speed: f32) -> PhaseTransform {
        let phase = clock + slot as f32 * 0.5;
        let breathe = 1.0 + (phase * 1.5).sin() * 0.02;
        let pulse = 1.0 + (phase * 2.0).sin() * 0.025;
        let drift = Vec2::new((phase * 0.8).sin() * 8.0, phase.cos() * 6.0);

        let mut out = match self {
            HoldMotion::None | HoldMotion::Spin => PhaseTransform::IDENTITY,
            HoldMotion::Breathe | HoldMotion::BreatheRot => PhaseTransform::scaled(breathe),
            HoldMotion::Pulse => PhaseTransform::scaled(pulse),
            HoldMotion::PulseDrift => PhaseTransform {
                scale: pulse,
                offset: drift,
                ..PhaseTransform::IDENTITY
            },
            HoldMotion::Drift => PhaseTransform::shifted(drift.x, drift.y),
            HoldMotion::Orbit => {
                PhaseTransform::shifted((phase * 0.5).cos() * 10.0, (phase * 0.5).sin() * 10.0)
            }
            HoldMotion::Float => PhaseTransform {
                scale: 1.0 + (phase * 1.5).sin() * 0.015,
                offset: Vec2::new(0.0, (phase * 1.2).sin() * 6.0),
                ..PhaseTransform::IDENTITY
            },
            HoldMotion::Wave => {
                PhaseTransform::scaled(1.0 + (phase * 2.5 + slot as f32 * 0.2).sin() * 0.02)
            }
            HoldMotion::Expand => PhaseTransform::scaled(1.0 + progress.clamp(0.0, 1.0) * 0.04),
            HoldMotion::Radiate => PhaseTransform::scaled(1.0 + (phase * 1.8).sin() * 0.02),
        };

        if self.rotates() {
            out.rotation = clock * rotation_speed;
        }
        out
    }
}

macro_rules! impl_named_kind {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|kind| kind.name() == s)
                    .ok_or_else(|| UnknownKind {
                        what: $what,
                        name: s.to_string(),
                    })
            }
        }
    };
}

impl_named_kind!(EnterKind, "enter kind");
impl_named_kind!(ExitKind, "exit kind");
impl_named_kind!(HoldMotion, "hold motion");

/// A kind name that is not in the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {what}: {name}")]
pub struct UnknownKind {
    pub what: &'static str,
    pub name: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shape Parameters and Evaluation
// ─────────────────────────────────────────────────────────────────────────────

/// Which phase a normalized time falls in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Enter,
    Hold,
    Exit,
}

/// Per-instance animation parameters, fixed at spawn
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeParams {
    /// Anchor the shape animates around
    pub origin: Point,
    pub enter: EnterKind,
    pub exit: ExitKind,
    /// End of the enter phase, in (0, 1)
    pub enter_end: f32,
    /// Start of the exit phase, in (enter_end, 1)
    pub exit_start: f32,
    pub base_scale: f32,
    pub base_rotation: f32,
    pub rotation_jitter: f32,
    pub hold: HoldMotion,
    /// Rate for rotating hold motions (radians per clock second)
    pub rotation_speed: Option<f32>,
    /// Linear drift applied across the hold window. No built-in figure
    /// sets this; hosts may.
    pub drift_velocity: Option<Vec2>,
}

impl ShapeParams {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            enter: EnterKind::default(),
            exit: ExitKind::default(),
            enter_end: DEFAULT_ENTER_END,
            exit_start: DEFAULT_EXIT_START,
            base_scale: 1.0,
            base_rotation: 0.0,
            rotation_jitter: 0.0,
            hold: HoldMotion::None,
            rotation_speed: None,
            drift_velocity: None,
        }
    }

    pub fn enter(mut self, kind: EnterKind) -> Self {
        self.enter = kind;
        self
    }

    pub fn exit(mut self, kind: ExitKind) -> Self {
        self.exit = kind;
        self
    }

    pub fn hold(mut self, motion: HoldMotion) -> Self {
        self.hold = motion;
        self
    }

    pub fn thresholds(mut self, enter_end: f32, exit_start: f32) -> Self {
        self.enter_end = enter_end;
        self.exit_start = exit_start;
        self
    }

    pub fn base_scale(mut self, scale: f32) -> Self {
        self.base_scale = scale;
        self
    }

    pub fn base_rotation(mut self, rotation: f32) -> Self {
        self.base_rotation = rotation;
        self
    }

    pub fn rotation_jitter(mut self, jitter: f32) -> Self {
        self.rotation_jitter = jitter;
        self
    }

    pub fn rotation_speed(mut self, speed: f32) -> Self {
        self.rotation_speed = Some(speed);
        self
    }

    pub fn drift_velocity(mut self, velocity: Vec2) -> Self {
        self.drift_velocity = Some(velocity);
        self
    }

    /// The phase that governs normalized time `t`
    pub fn phase_at(&self, t: f32) -> Phase {
        if t < self.enter_end {
            Phase::Enter
        } else if t > self.exit_start {
            Phase::Exit
        } else {
            Phase::Hold
        }
    }

    fn hold_progress(&self, t: f32) -> f32 {
        let span = (self.exit_start - self.enter_end).max(f32::EPSILON);
        ((t - self.enter_end) / span).clamp(0.0, 1.0)
    }
}

/// The composed transform applied to a visual handle for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeTransform {
    pub scale: f32,
    pub translation: Point,
    pub rotation: f32,
    pub opacity: f32,
}

/// Evaluate a shape's envelope for one frame.
///
/// - `t`: normalized lifetime, clamped to `[0, 1]`
/// - `clock`: wall-clock seconds, drives hold motion only
/// - `slot`: the shape's position in the registry, phase-offsets hold motion
/// - `viewport`: display size, scales slide and fly distances
pub fn evaluate(
    params: &ShapeParams,
    t: f32,
    clock: f32,
    slot: usize,
    viewport: Size,
) -> ShapeTransform {
    let t = t.clamp(0.0, 1.0);

    let (phase, hold) = match params.phase_at(t) {
        Phase::Enter => {
            let te = t / params.enter_end;
            (params.enter.curve()(te, viewport), PhaseTransform::IDENTITY)
        }
        Phase::Exit => {
            let te = (t - params.exit_start) / (1.0 - params.exit_start);
            (params.exit.curve()(te, viewport), PhaseTransform::IDENTITY)
        }
        // Hold motion, rotation included, exists only inside the hold
        // window. A rotating hold turns by `clock * speed` at `enter_end` and
        // snaps back at `exit_start`.
        Phase::Hold => {
            let progress = params.hold_progress(t);
            let speed = params.rotation_speed.unwrap_or(DEFAULT_ROTATION_SPEED);
            let mut hold = params.hold.sample(clock, slot, progress, speed);
            if let Some(velocity) = params.drift_velocity {
                hold.offset += velocity.scale(progress * DRIFT_DISTANCE);
            }
            (PhaseTransform::IDENTITY, hold)
        }
    };

    ShapeTransform {
        scale: phase.scale * params.base_scale * hold.scale,
        translation: params.origin.offset(phase.offset + hold.offset),
        rotation: phase.rotation + hold.rotation + params.base_rotation + params.rotation_jitter,
        opacity: phase.opacity * hold.opacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1920.0, 1080.0);
    const ORIGIN: Point = Point::new(960.0, 540.0);

    fn params() -> ShapeParams {
        ShapeParams::new(ORIGIN).thresholds(0.15, 0.78)
    }

    fn assert_close(a: ShapeTransform, b: ShapeTransform, what: &str) {
        assert!((a.scale - b.scale).abs() < 0.01, "{what}: scale {a:?} vs {b:?}");
        assert!(
            a.translation.distance(b.translation) < 1.0,
            "{what}: translation {a:?} vs {b:?}"
        );
        assert!(
            (a.rotation - b.rotation).abs() < 0.01,
            "{what}: rotation {a:?} vs {b:?}"
        );
        assert!(
            (a.opacity - b.opacity).abs() < 0.01,
            "{what}: opacity {a:?} vs {b:?}"
        );
    }

    #[test]
    fn test_phase_partition() {
        let p = params();
        assert_eq!(p.phase_at(0.0), Phase::Enter);
        assert_eq!(p.phase_at(0.1499), Phase::Enter);
        assert_eq!(p.phase_at(0.15), Phase::Hold);
        assert_eq!(p.phase_at(0.78), Phase::Hold);
        assert_eq!(p.phase_at(0.7801), Phase::Exit);
        assert_eq!(p.phase_at(1.0), Phase::Exit);
    }

    #[test]
    fn test_enter_boundary_continuity() {
        for kind in EnterKind::ALL {
            let p = params().enter(kind);
            let before = evaluate(&p, p.enter_end - 1e-4, 3.0, 0, VIEWPORT);
            let at = evaluate(&p, p.enter_end, 3.0, 0, VIEWPORT);
            assert_close(before, at, kind.name());
        }
    }

    #[test]
    fn test_exit_boundary_continuity() {
        for kind in ExitKind::ALL {
            let p = params().exit(kind);
            let at = evaluate(&p, p.exit_start, 3.0, 0, VIEWPORT);
            let after = evaluate(&p, p.exit_start + 1e-4, 3.0, 0, VIEWPORT);
            assert_close(at, after, kind.name());
        }
    }

    #[test]
    fn test_enter_starts_collapsed_or_displaced() {
        for kind in EnterKind::ALL {
            let p = params().enter(kind);
            let start = evaluate(&p, 0.0, 0.0, 0, VIEWPORT);
            let displaced = start.translation.distance(ORIGIN) > 100.0;
            let small = start.scale < 0.11;
            assert!(small || displaced, "{}: {start:?}", kind.name());
        }
    }

    #[test]
    fn test_every_exit_ends_invisible() {
        for kind in ExitKind::ALL {
            let p = params().exit(kind);
            let end = evaluate(&p, 1.0, 0.0, 0, VIEWPORT);
            assert!(
                end.scale.abs() < 1e-3 || end.opacity < 1e-3,
                "{}: {end:?}",
                kind.name()
            );
        }
    }

    #[test]
    fn test_enter_curves_land_on_identity() {
        for kind in EnterKind::ALL {
            let end = kind.curve()(1.0, VIEWPORT);
            assert!((end.scale - 1.0).abs() < 1e-4, "{}", kind.name());
            assert!(end.offset.length() < 1e-3, "{}", kind.name());
            assert!(end.rotation.abs() < 1e-4, "{}", kind.name());
        }
    }

    #[test]
    fn test_exit_curves_start_at_identity() {
        for kind in ExitKind::ALL {
            let start = kind.curve()(0.0, VIEWPORT);
            assert!((start.scale - 1.0).abs() < 1e-4, "{}", kind.name());
            assert!(start.offset.length() < 1e-3, "{}", kind.name());
            assert!(start.rotation.abs() < 1e-4, "{}", kind.name());
            assert_eq!(start.opacity, 1.0, "{}", kind.name());
        }
    }

    #[test]
    fn test_slide_left_enter_values() {
        let p = params().enter(EnterKind::SlideLeft);
        let start = evaluate(&p, 0.0, 0.0, 0, VIEWPORT);
        assert!((start.translation.x - (960.0 - 576.0)).abs() < 1e-3);
        assert_eq!(start.translation.y, 540.0);
        assert_eq!(start.scale, 1.0);
    }

    #[test]
    fn test_composition_layers_base_values() {
        let p = params()
            .enter(EnterKind::FromCenter)
            .base_scale(1.01)
            .base_rotation(0.5)
            .rotation_jitter(0.02);

        // Half-way through the enter phase
        let out = evaluate(&p, 0.075, 0.0, 0, VIEWPORT);
        assert!((out.scale - 0.5 * 1.01).abs() < 1e-5);
        assert!((out.rotation - 0.52).abs() < 1e-5);
        assert_eq!(out.translation, ORIGIN);
    }

    #[test]
    fn test_hold_without_motion_is_identity() {
        let p = params().base_rotation(0.3);
        let out = evaluate(&p, 0.5, 12.3, 4, VIEWPORT);
        assert_eq!(out.scale, 1.0);
        assert_eq!(out.translation, ORIGIN);
        assert!((out.rotation - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_hold_motion_amplitudes_are_small() {
        for motion in HoldMotion::ALL {
            for step in 0..200 {
                let clock = step as f32 * 0.37;
                let s = motion.sample(clock, step % 12, 0.5, 0.0);
                assert!((s.scale - 1.0).abs() <= 0.03, "{}", motion.name());
                assert!(s.offset.length() <= 10.0 + 1e-3, "{}", motion.name());
            }
        }
    }

    #[test]
    fn test_hold_motion_follows_wall_clock() {
        let p = params().hold(HoldMotion::Breathe);
        let a = evaluate(&p, 0.5, 0.0, 0, VIEWPORT);
        let b = evaluate(&p, 0.5, 1.0, 0, VIEWPORT);
        assert_ne!(a.scale, b.scale);

        // Same clock, different slots: phase-offset
        let c = evaluate(&p, 0.5, 1.0, 1, VIEWPORT);
        assert_ne!(b.scale, c.scale);
    }

    #[test]
    fn test_radiate_rotates_with_speed() {
        let p = params().hold(HoldMotion::Radiate).rotation_speed(0.03);
        let out = evaluate(&p, 0.5, 10.0, 0, VIEWPORT);
        assert!((out.rotation - 0.3).abs() < 1e-5);

        // Default speed when unset
        let p = params().hold(HoldMotion::Spin);
        let out = evaluate(&p, 0.5, 10.0, 0, VIEWPORT);
        assert!((out.rotation - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_rotating_hold_applies_only_in_hold_window() {
        let p = params().hold(HoldMotion::Radiate).rotation_speed(0.05);

        let before = evaluate(&p, p.enter_end - 1e-4, 10.0, 0, VIEWPORT);
        let at_enter_end = evaluate(&p, p.enter_end, 10.0, 0, VIEWPORT);
        assert!(before.rotation.abs() < 1e-6);
        assert!((at_enter_end.rotation - 0.5).abs() < 1e-5);

        let at_exit_start = evaluate(&p, p.exit_start, 10.0, 0, VIEWPORT);
        let after = evaluate(&p, p.exit_start + 1e-4, 10.0, 0, VIEWPORT);
        assert!((at_exit_start.rotation - 0.5).abs() < 1e-5);
        assert!(after.rotation.abs() < 1e-6);
    }

    #[test]
    fn test_curves_follow_named_easing() {
        for te in [0.0, 0.1, 0.35, 0.6, 0.9, 1.0] {
            let scale = |curve: PhaseCurve| curve(te, VIEWPORT).scale;
            assert_eq!(scale(EnterKind::Scale.curve()), Easing::EaseOutBack.apply(te));
            assert_eq!(scale(EnterKind::Bounce.curve()), Easing::EaseOutBounce.apply(te));
            assert_eq!(scale(EnterKind::Zoom.curve()), Easing::EaseInQuad.apply(te));
            assert_eq!(scale(EnterKind::Elastic.curve()), Easing::EaseOutElastic.apply(te));
            assert_eq!(scale(EnterKind::FromCenter.curve()), Easing::Linear.apply(te));
            assert_eq!(scale(ExitKind::Scale.curve()), 1.0 - Easing::EaseInBack.apply(te));
            assert_eq!(
                scale(ExitKind::BounceOut.curve()),
                1.0 - Easing::EaseOutBounce.apply(te)
            );
        }
    }

    #[test]
    fn test_expand_grows_across_hold() {
        let p = params().hold(HoldMotion::Expand);
        let early = evaluate(&p, 0.15, 0.0, 0, VIEWPORT);
        let late = evaluate(&p, 0.78, 0.0, 0, VIEWPORT);
        assert!((early.scale - 1.0).abs() < 1e-5);
        assert!((late.scale - 1.04).abs() < 1e-5);
    }

    #[test]
    fn test_drift_velocity_applies_in_hold_only() {
        let p = params().drift_velocity(Vec2::new(1.0, 0.0));
        let end_of_hold = evaluate(&p, 0.78, 0.0, 0, VIEWPORT);
        assert!((end_of_hold.translation.x - (960.0 + 120.0)).abs() < 1e-3);

        let in_enter = evaluate(&p, 0.1, 0.0, 0, VIEWPORT);
        assert_eq!(in_enter.translation.x, 960.0);
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in EnterKind::ALL {
            assert_eq!(kind.name().parse::<EnterKind>(), Ok(kind));
        }
        for kind in ExitKind::ALL {
            assert_eq!(kind.to_string().parse::<ExitKind>(), Ok(kind));
        }
        for motion in HoldMotion::ALL {
            assert_eq!(motion.name().parse::<HoldMotion>(), Ok(motion));
        }
        let err = "wobble".parse::<EnterKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown enter kind: wobble");
    }
}
