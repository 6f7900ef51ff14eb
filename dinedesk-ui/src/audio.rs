//! Web Audio Chime
//!
//! Renders the core `ChimeSpec` with one oscillator and gain envelope per tone.

use dinedesk::notify::{ChimeError, ChimePlayer, ChimeSpec};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, OscillatorType};

/// Opens its `AudioContext` on first use and keeps it until closed
#[derive(Default)]
pub struct WebAudioChime {
    ctx: Option<AudioContext>,
}

impl WebAudioChime {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self) -> Result<&AudioContext, ChimeError> {
        if self.ctx.is_none() {
            let ctx = AudioContext::new().map_err(|e| ChimeError::Unavailable(js_error(&e)))?;
            self.ctx = Some(ctx);
        }
        self.ctx
            .as_ref()
            .ok_or_else(|| ChimeError::Unavailable("no audio context".into()))
    }
}

impl ChimePlayer for WebAudioChime {
    fn play(&mut self, spec: &ChimeSpec) -> Result<(), ChimeError> {
        let ctx = self.context()?;

        // Browsers suspend contexts created without a user gesture. The resume
        // promise is not awaited: currentTime stays frozen while suspended, so
        // tones scheduled against it start once the context is running.
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let now = ctx.current_time();
        let peak = spec.peak_gain as f32;
        for tone in &spec.tones {
            let start = now + tone.start_s;
            let end = now + tone.end_s();

            let oscillator = ctx.create_oscillator().map_err(playback)?;
            let gain = ctx.create_gain().map_err(playback)?;

            oscillator.set_type(OscillatorType::Sine);
            oscillator.frequency().set_value(tone.frequency_hz as f32);

            let envelope = gain.gain();
            envelope.set_value_at_time(0.0, start).map_err(playback)?;
            envelope
                .linear_ramp_to_value_at_time(peak, start + spec.attack_s)
                .map_err(playback)?;
            envelope
                .linear_ramp_to_value_at_time(0.0, end)
                .map_err(playback)?;

            oscillator.connect_with_audio_node(&gain).map_err(playback)?;
            gain.connect_with_audio_node(&ctx.destination())
                .map_err(playback)?;

            oscillator.start_with_when(start).map_err(playback)?;
            oscillator.stop_with_when(end).map_err(playback)?;
        }
        Ok(())
    }

    fn close(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            let _ = ctx.close();
        }
    }
}

fn playback(e: JsValue) -> ChimeError {
    ChimeError::Playback(js_error(&e))
}

fn js_error(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}
