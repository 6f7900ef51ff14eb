//! Notification Tone
//!
//! Two short ascending sine tones (C5 then E5) with a linear attack/decay
//! envelope. Platforms implement [`ChimePlayer`] to turn the description into
//! sound.

use thiserror::Error;

/// One sine tone inside a chime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f64,
    /// Offset from the start of the chime, seconds
    pub start_s: f64,
    pub duration_s: f64,
}

impl Tone {
    pub fn end_s(&self) -> f64 {
        self.start_s + self.duration_s
    }
}

/// Full chime description shared by every player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChimeSpec {
    pub tones: [Tone; 2],
    pub peak_gain: f64,
    pub attack_s: f64,
}

pub const NOTIFICATION_CHIME: ChimeSpec = ChimeSpec {
    tones: [
        Tone {
            frequency_hz: 523.25,
            start_s: 0.0,
            duration_s: 0.15,
        },
        Tone {
            frequency_hz: 659.25,
            start_s: 0.15,
            duration_s: 0.15,
        },
    ],
    peak_gain: 0.3,
    attack_s: 0.01,
};

impl ChimeSpec {
    pub fn total_duration_s(&self) -> f64 {
        self.tones.iter().map(Tone::end_s).fold(0.0, f64::max)
    }

    /// Gain of `tone` at `t` seconds since the chime started.
    ///
    /// Linear ramp 0 → peak over `attack_s`, then linear back to 0 at the
    /// tone's end. Zero outside the tone.
    pub fn envelope_at(&self, tone: &Tone, t: f64) -> f64 {
        let local = t - tone.start_s;
        if local < 0.0 || local > tone.duration_s {
            return 0.0;
        }
        if local <= self.attack_s {
            return self.peak_gain * (local / self.attack_s);
        }
        let decay = tone.duration_s - self.attack_s;
        if decay <= 0.0 {
            return 0.0;
        }
        self.peak_gain * (1.0 - (local - self.attack_s) / decay)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChimeError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),

    #[error("audio playback failed: {0}")]
    Playback(String),
}

/// Audio sink able to render a [`ChimeSpec`].
///
/// Implementations open their output lazily on the first `play` and must
/// tolerate being closed more than once.
pub trait ChimePlayer {
    fn play(&mut self, spec: &ChimeSpec) -> Result<(), ChimeError>;

    fn close(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tones_ascend() {
        let [first, second] = NOTIFICATION_CHIME.tones;
        assert!(second.frequency_hz > first.frequency_hz);
        assert!(second.start_s >= first.start_s);
        assert!((NOTIFICATION_CHIME.total_duration_s() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_envelope_shape() {
        let spec = NOTIFICATION_CHIME;
        let tone = spec.tones[0];
        assert_eq!(spec.envelope_at(&tone, -0.01), 0.0);
        assert_eq!(spec.envelope_at(&tone, 0.0), 0.0);
        assert!((spec.envelope_at(&tone, 0.005) - 0.15).abs() < 1e-9);
        assert!((spec.envelope_at(&tone, 0.01) - 0.3).abs() < 1e-9);
        assert!(spec.envelope_at(&tone, 0.08) < 0.3);
        assert!(spec.envelope_at(&tone, 0.15).abs() < 1e-9);
        assert_eq!(spec.envelope_at(&tone, 0.2), 0.0);
    }

    #[test]
    fn test_second_tone_silent_before_start() {
        let spec = NOTIFICATION_CHIME;
        assert_eq!(spec.envelope_at(&spec.tones[1], 0.1), 0.0);
        assert!(spec.envelope_at(&spec.tones[1], 0.17) > 0.0);
    }
}
