//! Trigger coordinator
//!
//! The single entry point for a cell activation. One trigger:
//!
//! ```text
//! advance background ──▶ pick foreground ──▶ highlight cell ──▶ play tone
//!        ──▶ render figure ──▶ randomize envelope ──▶ registry insert
//! ```
//!
//! Figures always anchor at the viewport center; the gesture origin is
//! only logged.

use tessel_animation::{
    EnterKind, ExitKind, InsertOutcome, JitterSource, ShapeParams, ShapeRecord,
};
use tessel_core::{Color, Point};
use tessel_platform::Gesture;

use crate::audio::{AudioSink, ToneSpec};
use crate::config::{AudioConfig, StageConfig, TimingConfig};
use crate::engine::Engine;
use crate::figures::MotionHints;
use crate::palette;
use crate::renderer::{Rendered, Renderer};

/// What a trigger did
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerReport {
    pub cell: usize,
    pub background: Color,
    pub foreground: Color,
    pub tone: ToneSpec,
    pub outcome: InsertOutcome,
    pub enter: EnterKind,
    pub exit: ExitKind,
}

/// Turns gestures into live shapes
pub struct TriggerCoordinator<R, A, J> {
    renderer: R,
    audio: A,
    jitter: J,
    timing: TimingConfig,
    audio_config: AudioConfig,
    press_secs: f32,
}

impl<R, A, J> TriggerCoordinator<R, A, J>
where
    R: Renderer,
    A: AudioSink,
    J: JitterSource,
{
    pub fn new(config: &StageConfig, renderer: R, audio: A, jitter: J) -> Self {
        Self {
            renderer,
            audio,
            jitter,
            timing: config.timing.clone(),
            audio_config: config.audio.clone(),
            press_secs: config.indicator.press_secs,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Activate `gesture.cell`.
    ///
    /// Returns `None` without touching any state when the renderer has no
    /// figure for the cell.
    pub fn trigger(
        &mut self,
        engine: &mut Engine<R::Handle>,
        gesture: &Gesture,
    ) -> Option<TriggerReport> {
        let cell = gesture.cell;
        let cell_count = self.renderer.cell_count();
        if cell >= cell_count {
            tracing::warn!(cell, cell_count, "trigger for unknown cell ignored");
            return None;
        }

        let anchor = engine.anchor();
        let background = engine.advance_background();
        let foreground = palette::foreground_for(cell, background);
        self.renderer.set_background(background);

        engine.press(cell, gesture.at, self.press_secs);

        let tone = ToneSpec::for_cell(cell, &self.audio_config);
        self.audio.play_tone(&tone);

        let Rendered { handle, hints } =
            self.renderer
                .render(cell, anchor, foreground, engine.viewport());
        let params = self.params(anchor, &hints);
        let (enter, exit) = (params.enter, params.exit);

        let outcome = engine
            .registry_mut()
            .insert(ShapeRecord::new(handle, Some(cell), params));

        tracing::debug!(
            cell,
            source = ?gesture.source,
            origin = ?gesture.origin,
            background = %background,
            %enter,
            %exit,
            restarted = outcome.restarted.is_some(),
            evicted = outcome.evicted.len(),
            live = engine.registry().len(),
            "trigger"
        );

        Some(TriggerReport {
            cell,
            background,
            foreground,
            tone,
            outcome,
            enter,
            exit,
        })
    }

    /// Envelope for a new shape: figure hints first, jitter for the rest
    fn params(&mut self, anchor: Point, hints: &MotionHints) -> ShapeParams {
        let timing = &self.timing;
        let jitter = &mut self.jitter;

        let enter = match hints.enter {
            Some(kind) => kind,
            None => jitter.pick(&timing.enter_pool),
        };
        let exit = match hints.exit {
            Some(kind) => kind,
            None => jitter.pick(&timing.exit_pool),
        };
        let base_scale = jitter.range(
            1.0 - timing.base_scale_spread,
            1.0 + timing.base_scale_spread,
        );
        let enter_end = timing.enter_end + jitter.range(0.0, timing.enter_end_spread);
        let exit_start = timing.exit_start + jitter.range(0.0, timing.exit_start_spread);
        let base_rotation =
            hints.base_rotation + jitter.range(-timing.rotation_spread, timing.rotation_spread);
        let rotation_jitter = jitter.range(-timing.rotation_jitter, timing.rotation_jitter);

        let mut params = ShapeParams::new(anchor)
            .enter(enter)
            .exit(exit)
            .hold(hints.hold)
            .thresholds(enter_end, exit_start)
            .base_scale(base_scale)
            .base_rotation(base_rotation)
            .rotation_jitter(rotation_jitter);
        if let Some(speed) = hints.rotation_speed {
            params = params.rotation_speed(speed);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::SceneRenderer;
    use crate::scene::Scene;
    use tessel_animation::{FixedJitter, HoldMotion, SequenceJitter};
    use tessel_core::Size;
    use tessel_platform::GestureSource;

    use crate::audio::NullSink;

    const VIEWPORT: Size = Size::new(1920.0, 1080.0);

    #[derive(Default)]
    struct RecordingSink {
        notes: Vec<u8>,
    }

    impl AudioSink for RecordingSink {
        fn play_tone(&mut self, tone: &ToneSpec) {
            self.notes.push(tone.midi_note);
        }
    }

    fn gesture(cell: usize) -> Gesture {
        Gesture {
            cell,
            origin: Point::new(10.0, 10.0),
            at: 0.0,
            source: GestureSource::Pointer,
        }
    }

    #[test]
    fn test_trigger_builds_centered_shape() {
        let config = StageConfig::default();
        let scene = Scene::default();
        let mut engine = Engine::new(&config, VIEWPORT);
        let mut coordinator = TriggerCoordinator::new(
            &config,
            SceneRenderer::new(scene.handle()),
            RecordingSink::default(),
            FixedJitter(0.5),
        );

        let report = coordinator.trigger(&mut engine, &gesture(0)).unwrap();
        assert_eq!(report.cell, 0);
        assert_eq!(report.tone.midi_note, 48);
        assert_eq!(coordinator.audio().notes, vec![48]);
        assert_eq!(engine.background().index(), 1);
        assert_eq!(scene.background(), report.background);
        assert!(engine.is_pressed(0, 0.1));

        let record = engine.registry().iter().next().unwrap();
        assert_eq!(record.cell, Some(0));
        assert_eq!(record.params.origin, Point::new(960.0, 540.0));
        assert!((record.params.base_scale - 1.0).abs() < 1e-6);
        assert!((record.params.enter_end - 0.15).abs() < 1e-6);
        assert!((record.params.exit_start - 0.76).abs() < 1e-6);
        assert!(record.params.rotation_jitter.abs() < 1e-6);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_foreground_contrasts_with_new_background() {
        let config = StageConfig::default();
        let scene = Scene::default();
        let mut engine = Engine::new(&config, VIEWPORT);
        let mut coordinator = TriggerCoordinator::new(
            &config,
            SceneRenderer::new(scene.handle()),
            NullSink,
            FixedJitter(0.5),
        );

        for cell in 0..6 {
            let report = coordinator.trigger(&mut engine, &gesture(cell)).unwrap();
            assert_eq!(report.foreground, palette::foreground_for(cell, report.background));
            assert_ne!(
                report.background.luminance() < 0.5,
                report.foreground.luminance() < 0.5,
                "cell {cell}"
            );
        }
    }

    #[test]
    fn test_hints_override_pools() {
        let config = StageConfig::default();
        let scene = Scene::default();
        let mut engine = Engine::new(&config, VIEWPORT);
        let mut coordinator = TriggerCoordinator::new(
            &config,
            SceneRenderer::new(scene.handle()),
            NullSink,
            FixedJitter(0.0),
        );

        // Cell 5 is the hammer, which slams in and out
        let report = coordinator.trigger(&mut engine, &gesture(5)).unwrap();
        assert_eq!(report.enter, EnterKind::SlamDown);
        assert_eq!(report.exit, ExitKind::SlamUp);

        // Cell 4 radiates and draws its kinds from the pools
        let report = coordinator.trigger(&mut engine, &gesture(4)).unwrap();
        assert_eq!(report.enter, config.timing.enter_pool[0]);
        assert_eq!(report.exit, config.timing.exit_pool[0]);
        let record = engine.registry().iter().last().unwrap();
        assert_eq!(record.params.hold, HoldMotion::Radiate);
        assert_eq!(record.params.rotation_speed, Some(0.03));
    }

    #[test]
    fn test_pool_draws_follow_jitter() {
        let config = StageConfig::default();
        let scene = Scene::default();
        let mut engine = Engine::new(&config, VIEWPORT);
        // First two samples pick the enter and exit kinds
        let mut coordinator = TriggerCoordinator::new(
            &config,
            SceneRenderer::new(scene.handle()),
            NullSink,
            SequenceJitter::new(vec![0.99, 0.3, 0.5, 0.5, 0.5, 0.5, 0.5]),
        );

        let report = coordinator.trigger(&mut engine, &gesture(0)).unwrap();
        assert_eq!(report.enter, EnterKind::Zoom);
        assert_eq!(report.exit, ExitKind::Implode);
    }

    #[test]
    fn test_unknown_cell_changes_nothing() {
        let config = StageConfig::default();
        let scene = Scene::default();
        let mut engine = Engine::new(&config, VIEWPORT);
        let mut coordinator = TriggerCoordinator::new(
            &config,
            SceneRenderer::new(scene.handle()),
            RecordingSink::default(),
            FixedJitter(0.5),
        );

        assert!(coordinator.trigger(&mut engine, &gesture(36)).is_none());
        assert_eq!(engine.background().index(), 0);
        assert!(engine.registry().is_empty());
        assert!(coordinator.audio().notes.is_empty());
        assert!(scene.is_empty());
    }
}
