//! Headless performance runner
//!
//! Feeds a key script through a session exactly as a window would: each
//! key is pressed and released, then a few frames run on a manual clock.
//! After the last key the session keeps running until every figure has
//! left the scene.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use tessel_animation::{ManualClock, SeededJitter};
use tessel_app::{Scene, SceneRenderer, Session, SessionStats, StageConfig, TracingSink};
use tessel_core::{Color, Size};
use tessel_platform::{Event, InputEvent, Key, KeyMap, KeyboardEvent};

/// Upper bound on frames spent waiting for the scene to empty
const MAX_DRAIN_FRAMES: u32 = 100_000;

/// Options for a scripted performance
#[derive(Clone, Debug)]
pub struct PlayOptions {
    pub keys: String,
    pub frames_per_key: u32,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
    pub width: f32,
    pub height: f32,
}

/// What a performance did
#[derive(Clone, Debug)]
pub struct PlaySummary {
    pub stats: SessionStats,
    pub frames: u64,
    pub duration_secs: f32,
    pub background: Color,
}

type HeadlessSession = Session<SceneRenderer, TracingSink, SeededJitter, ManualClock>;

/// Play `options.keys` to completion
pub fn run(options: &PlayOptions, config: &StageConfig) -> Result<PlaySummary> {
    // Reject unbound keys before anything plays
    let keymap = KeyMap::standard();
    keymap
        .parse_script(&options.keys)
        .context("Invalid key script")?;

    let jitter = match options.seed {
        Some(seed) => SeededJitter::with_seed(seed),
        None => SeededJitter::new(),
    };

    let scene = Scene::default();
    let mut session: HeadlessSession = Session::new(
        config,
        Size::new(options.width, options.height),
        SceneRenderer::new(scene.handle()),
        TracingSink,
        jitter,
        ManualClock::new(0.0),
    )
    .context("Failed to start session")?;
    let step = config.engine.frame_step_secs;

    for c in options.keys.chars().filter(|c| !c.is_whitespace()) {
        let key = Key::Char(c);
        session.handle(&Event::Input(InputEvent::Keyboard(KeyboardEvent::pressed(
            key.clone(),
        ))));
        session.handle(&Event::Input(InputEvent::Keyboard(KeyboardEvent::released(
            key,
        ))));
        debug!(key = %c, live = scene.len(), "key played");

        for _ in 0..options.frames_per_key {
            advance(&mut session, step);
        }
    }

    let mut drained = 0;
    while !scene.is_empty() && drained < MAX_DRAIN_FRAMES {
        advance(&mut session, step);
        drained += 1;
    }
    debug!(drained, "scene drained");

    Ok(PlaySummary {
        stats: session.stats(),
        frames: session.frames(),
        duration_secs: session.now_secs(),
        background: scene.background(),
    })
}

fn advance(session: &mut HeadlessSession, step: f32) {
    session.clock_mut().advance(step);
    session.handle(&Event::Frame);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(keys: &str) -> PlayOptions {
        PlayOptions {
            keys: keys.to_string(),
            frames_per_key: 4,
            seed: Some(7),
            config: None,
            width: 1280.0,
            height: 720.0,
        }
    }

    #[test]
    fn test_script_plays_to_empty_scene() {
        let summary = run(&options("zxc zxc"), &StageConfig::default()).unwrap();
        assert_eq!(summary.stats.triggers, 6);
        assert_eq!(summary.stats.restarted, 3);
        assert_eq!(summary.stats.reaped, 3);
        // Six triggers step the background six times
        assert_eq!(summary.background.to_hex(), 0x1C3A5C);
    }

    #[test]
    fn test_unbound_key_is_rejected() {
        assert!(run(&options("zx#"), &StageConfig::default()).is_err());
    }
}
