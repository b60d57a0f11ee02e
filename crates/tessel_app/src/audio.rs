//! Tone cues
//!
//! Each cell plays one short chromatic note. The note itself is described
//! by a [`ToneSpec`]; producing sound is left to an [`AudioSink`], so the
//! engine never blocks on or depends on an audio device.

use std::fmt;

use crate::config::AudioConfig;

/// MIDI note of A4
const A4_NOTE: f32 = 69.0;
const A4_HZ: f32 = 440.0;

/// Oscillator shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
}

impl Waveform {
    /// Waveform rotation across neighbouring cells
    const CYCLE: [Waveform; 5] = [
        Waveform::Sine,
        Waveform::Triangle,
        Waveform::Sine,
        Waveform::Triangle,
        Waveform::Square,
    ];

    pub fn for_cell(cell: usize) -> Self {
        Self::CYCLE[cell % Self::CYCLE.len()]
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Square => "square",
        })
    }
}

/// Gain reached at a point in time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainPoint {
    pub at_secs: f32,
    pub gain: f32,
}

/// A fully described tone
#[derive(Clone, Debug, PartialEq)]
pub struct ToneSpec {
    pub cell: usize,
    pub midi_note: u8,
    pub frequency_hz: f32,
    pub waveform: Waveform,
    /// Starts at the first point, ramps exponentially between points
    pub envelope: [GainPoint; 3],
    /// The oscillator stops here
    pub duration_secs: f32,
}

impl ToneSpec {
    pub fn for_cell(cell: usize, config: &AudioConfig) -> Self {
        let midi_note = config
            .base_note
            .saturating_add(u8::try_from(cell).unwrap_or(u8::MAX));
        Self {
            cell,
            midi_note,
            frequency_hz: midi_to_hz(midi_note),
            waveform: Waveform::for_cell(cell),
            envelope: [
                GainPoint {
                    at_secs: 0.0,
                    gain: config.peak_gain,
                },
                GainPoint {
                    at_secs: config.sustain_secs,
                    gain: config.sustain_gain,
                },
                GainPoint {
                    at_secs: config.duration_secs,
                    gain: config.floor_gain,
                },
            ],
            duration_secs: config.duration_secs,
        }
    }

    /// Gain at `t` seconds into the tone; silent outside it
    pub fn gain_at(&self, t: f32) -> f32 {
        if t < 0.0 || t > self.duration_secs {
            return 0.0;
        }
        for pair in self.envelope.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if t <= to.at_secs {
                let span = (to.at_secs - from.at_secs).max(f32::EPSILON);
                let progress = (t - from.at_secs) / span;
                // Exponential ramp: constant ratio per unit time
                return from.gain * (to.gain / from.gain).powf(progress);
            }
        }
        self.envelope[2].gain
    }
}

/// Equal-tempered frequency of a MIDI note
pub fn midi_to_hz(note: u8) -> f32 {
    A4_HZ * 2f32.powf((note as f32 - A4_NOTE) / 12.0)
}

/// Something that can play tones
pub trait AudioSink {
    /// Start a tone; must return without waiting for it to finish
    fn play_tone(&mut self, tone: &ToneSpec);
}

/// Logs every tone instead of playing it
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl AudioSink for TracingSink {
    fn play_tone(&mut self, tone: &ToneSpec) {
        tracing::info!(
            cell = tone.cell,
            note = tone.midi_note,
            hz = format_args!("{:.2}", tone.frequency_hz),
            waveform = %tone.waveform,
            "tone"
        );
    }
}

/// Discards every tone
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play_tone(&mut self, _tone: &ToneSpec) {}
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn play_tone(&mut self, tone: &ToneSpec) {
        (**self).play_tone(tone);
    }
}
