//! End-to-end tests for tessel_app
//!
//! Whole sessions over a real scene, with pinned jitter and a manual clock.

use tessel_animation::{FixedJitter, ManualClock};
use tessel_core::Size;

use crate::palette::BACKGROUNDS;
use crate::prelude::*;

type TestSession = Session<SceneRenderer, NullSink, FixedJitter, ManualClock>;

const VIEWPORT: Size = Size::new(1920.0, 1080.0);

fn create_session(scene: &Scene) -> TestSession {
    create_session_with(scene, StageConfig::default())
}

fn create_session_with(scene: &Scene, config: StageConfig) -> TestSession {
    Session::new(
        &config,
        VIEWPORT,
        SceneRenderer::new(scene.handle()),
        NullSink,
        FixedJitter(0.5),
        ManualClock::new(0.0),
    )
    .expect("default config is valid")
}

/// Advance the clock one step and run a frame
fn step(session: &mut TestSession) {
    session.clock_mut().advance(0.016);
    session.frame();
}

fn live_cells(session: &TestSession) -> Vec<Option<usize>> {
    session.engine().registry().cells().collect()
}

#[test]
fn test_thirteen_triggers_evict_the_first() {
    let scene = Scene::default();
    let mut session = create_session(&scene);

    for cell in 0..=11 {
        let report = session.trigger_cell(cell).unwrap();
        assert!(report.outcome.evicted.is_empty());
    }
    let report = session.trigger_cell(12).unwrap();
    assert_eq!(report.outcome.evicted, vec![Some(0)]);

    let expected: Vec<_> = (1..=12).map(Some).collect();
    assert_eq!(live_cells(&session), expected);
    assert_eq!(scene.cells(), expected);
}

#[test]
fn test_ten_triggers_advance_background_ten_steps() {
    let scene = Scene::default();
    let mut session = create_session(&scene);

    for cell in 0..10 {
        session.trigger_cell(cell);
    }
    let background = session.engine().background();
    assert_eq!(background.index(), 10);
    assert_eq!(background.current().to_hex(), BACKGROUNDS[10]);
    assert_eq!(scene.background(), background.current());
}

#[test]
fn test_retrigger_restarts_instead_of_stacking() {
    let scene = Scene::default();
    let mut session = create_session(&scene);

    session.trigger_cell(3);
    for _ in 0..20 {
        step(&mut session);
    }
    let report = session.trigger_cell(3).unwrap();
    assert_eq!(report.outcome.restarted, Some(3));

    assert_eq!(live_cells(&session), vec![Some(3)]);
    assert_eq!(scene.len(), 1);
    let record = session.engine().registry().iter().next().unwrap();
    assert_eq!(record.elapsed, 0.0);
}

#[test]
fn test_scene_tracks_registry_through_a_performance() {
    let scene = Scene::default();
    let mut session = create_session(&scene);

    // Overlapping triggers, restarts, evictions, and reaping
    let script = [0, 5, 5, 9, 14, 0, 21, 35, 2, 7, 7, 30, 11, 18, 26, 3, 33];
    for (i, &cell) in script.iter().enumerate() {
        session.trigger_cell(cell);
        assert_eq!(scene.len(), session.engine().registry().len());
        for _ in 0..(i % 4) * 5 {
            step(&mut session);
            assert_eq!(scene.len(), session.engine().registry().len());
        }
    }

    for _ in 0..80 {
        step(&mut session);
        assert_eq!(scene.len(), session.engine().registry().len());
    }
    assert!(scene.is_empty());

    let stats = session.stats();
    assert_eq!(stats.triggers, script.len() as u64);
    assert_eq!(stats.restarted + stats.evicted + stats.reaped, stats.triggers);
}

#[test]
fn test_pressed_indicator_expires() {
    let scene = Scene::default();
    let mut session = create_session(&scene);

    session.trigger_cell(8);
    assert_eq!(session.engine().pressed_cells(session.now_secs()), vec![8]);

    for _ in 0..20 {
        step(&mut session);
    }
    // 0.32 s in
    assert!(session.engine().is_pressed(8, session.now_secs()));

    for _ in 0..6 {
        step(&mut session);
    }
    // 0.416 s in
    assert!(!session.engine().is_pressed(8, session.now_secs()));
    assert!(session.engine().pressed_cells(session.now_secs()).is_empty());
}

#[test]
fn test_unknown_cell_is_ignored() {
    let scene = Scene::default();
    let mut session = create_session(&scene);

    assert!(session.trigger_cell(36).is_none());
    assert!(session.trigger_cell(usize::MAX).is_none());

    assert_eq!(session.stats().ignored, 2);
    assert_eq!(session.stats().triggers, 0);
    assert_eq!(session.engine().background().index(), 0);
    assert!(scene.is_empty());
}

#[test]
fn test_shapes_animate_then_leave() {
    let scene = Scene::default();
    let mut session = create_session(&scene);
    session.trigger_cell(0);

    step(&mut session);
    let mut scale = None;
    scene.for_each_node(|_, node| scale = Some(node.transform.scale));
    // Nodes start at scale 0; the first frame grows them
    assert!(scale.unwrap() > 0.0);

    // Mid-life: resting near full size on the anchor
    for _ in 0..29 {
        step(&mut session);
    }
    scene.for_each_node(|_, node| {
        assert!((node.transform.scale - 1.0).abs() < 0.05);
        assert!((node.transform.translation.x - 960.0).abs() < 1e-3);
        assert!((node.transform.translation.y - 540.0).abs() < 1e-3);
    });

    for _ in 0..40 {
        step(&mut session);
    }
    assert!(scene.is_empty());
}

#[test]
fn test_smaller_population_bound() {
    let scene = Scene::default();
    let mut config = StageConfig::default();
    config.engine.max_live = 3;
    let mut session = create_session_with(&scene, config);

    for cell in 0..6 {
        session.trigger_cell(cell);
    }
    assert_eq!(live_cells(&session), vec![Some(3), Some(4), Some(5)]);
    assert_eq!(scene.len(), 3);
    assert_eq!(session.stats().evicted, 3);
}

#[test]
fn test_dropping_session_clears_scene() {
    let scene = Scene::default();
    {
        let mut session = create_session(&scene);
        for cell in 0..4 {
            session.trigger_cell(cell);
        }
        assert_eq!(scene.len(), 4);
    }
    assert!(scene.is_empty());
}
