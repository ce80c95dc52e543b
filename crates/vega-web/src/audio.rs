//! WebAudio soundscape engine. Builds the node graph for each recipe
//! behind a per-soundscape gain, all routed through one master gain.
//! Audio failures are logged and swallowed; the page keeps running
//! without sound.

use fnv::FnvHashMap;
use vega_core::{
    recipe, Recipe, SoundscapeId, Tone, DEFAULT_MASTER_VOLUME, DEFAULT_SCAPE_VOLUME,
    GAIN_RAMP_SECS, LFO_DEPTH_RATIO, LFO_RATE_MIN_HZ, LFO_RATE_SPAN_HZ,
};
use web_sys as web;

/// Live nodes for one running soundscape, kept so deactivation can
/// stop and disconnect everything.
struct LiveScape {
    gain: web::GainNode,
    oscillators: Vec<web::OscillatorNode>,
    buffers: Vec<web::AudioBufferSourceNode>,
}

pub struct AudioEngine {
    ctx: Option<web::AudioContext>,
    master: Option<web::GainNode>,
    master_volume: f32,
    volumes: FnvHashMap<SoundscapeId, f32>,
    scapes: FnvHashMap<SoundscapeId, LiveScape>,
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, ()> {
    match web::GainNode::new(ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

fn create_oscillator(ctx: &web::AudioContext, freq: f32) -> Result<web::OscillatorNode, ()> {
    match web::OscillatorNode::new(ctx) {
        Ok(o) => {
            o.set_type(web::OscillatorType::Sine);
            o.frequency().set_value(freq);
            Ok(o)
        }
        Err(e) => {
            log::error!("OscillatorNode error: {:?}", e);
            Err(())
        }
    }
}

impl AudioEngine {
    pub fn new() -> Self {
        Self {
            ctx: None,
            master: None,
            master_volume: DEFAULT_MASTER_VOLUME,
            volumes: FnvHashMap::default(),
            scapes: FnvHashMap::default(),
        }
    }

    pub fn is_active(&self, id: SoundscapeId) -> bool {
        self.scapes.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.scapes.len()
    }

    fn volume(&self, id: SoundscapeId) -> f32 {
        self.volumes.get(&id).copied().unwrap_or(DEFAULT_SCAPE_VOLUME)
    }

    /// Create the context and master gain on first use; resume the
    /// context if the browser suspended it. Safe to call every time.
    pub fn ensure_context(&mut self) -> Option<web::AudioContext> {
        if self.ctx.is_none() {
            let ctx = match web::AudioContext::new() {
                Ok(c) => c,
                Err(e) => {
                    log::error!("AudioContext error: {:?}", e);
                    return None;
                }
            };
            match create_gain(&ctx, self.master_volume, "Master") {
                Ok(master) => {
                    let _ = master.connect_with_audio_node(&ctx.destination());
                    self.master = Some(master);
                    self.ctx = Some(ctx);
                }
                Err(()) => return None,
            }
        }
        let ctx = self.ctx.clone()?;
        if ctx.state() == web::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Start a soundscape. Already running is a no-op, so repeated
    /// activations never stack duplicate node graphs.
    pub fn activate(&mut self, id: SoundscapeId) {
        if self.scapes.contains_key(&id) {
            return;
        }
        let Some(ctx) = self.ensure_context() else { return };
        let Some(master) = self.master.clone() else { return };
        let Ok(gain) = create_gain(&ctx, 0.0, id.as_str()) else { return };
        let _ = gain.connect_with_audio_node(&master);

        let mut live = LiveScape {
            gain,
            oscillators: Vec::new(),
            buffers: Vec::new(),
        };
        match *recipe(id) {
            Recipe::ToneBank(tones) => {
                for t in tones {
                    build_tone(&ctx, &live.gain, t, &mut live.oscillators);
                }
            }
            Recipe::TonesWithNoise {
                tones,
                noise_gain,
                noise_amp,
                lowpass_hz,
            } => {
                for t in tones {
                    build_tone(&ctx, &live.gain, t, &mut live.oscillators);
                }
                build_noise_bed(&ctx, &live.gain, noise_gain, noise_amp, lowpass_hz, &mut live.buffers);
            }
            Recipe::Binaural {
                base_hz,
                beat_hz,
                pair_gain,
                carrier_hz,
                carrier_gain,
            } => {
                build_binaural_pair(&ctx, &live.gain, base_hz, beat_hz, pair_gain, &mut live.oscillators);
                build_tone(
                    &ctx,
                    &live.gain,
                    &Tone {
                        freq: carrier_hz,
                        gain: carrier_gain,
                    },
                    &mut live.oscillators,
                );
            }
        }

        // Ramp the soundscape in rather than clicking on
        let now = ctx.current_time();
        live.gain.gain().set_value(0.0);
        let _ = live
            .gain
            .gain()
            .linear_ramp_to_value_at_time(self.volume(id), now + GAIN_RAMP_SECS);

        for osc in &live.oscillators {
            let _ = osc.start();
        }
        for buf in &live.buffers {
            let _ = buf.start();
        }
        log::info!("[audio] {} on", id.as_str());
        self.scapes.insert(id, live);
    }

    /// Stop a soundscape. Double stops and stops of never-started
    /// soundscapes are no-ops.
    pub fn deactivate(&mut self, id: SoundscapeId) {
        let Some(live) = self.scapes.remove(&id) else { return };
        for osc in &live.oscillators {
            let _ = osc.stop();
            let _ = osc.disconnect();
        }
        for buf in &live.buffers {
            let _ = buf.stop();
            let _ = buf.disconnect();
        }
        let _ = live.gain.disconnect();
        log::info!("[audio] {} off", id.as_str());
    }

    pub fn toggle(&mut self, id: SoundscapeId) -> bool {
        if self.is_active(id) {
            self.deactivate(id);
            false
        } else {
            self.activate(id);
            true
        }
    }

    pub fn set_volume(&mut self, id: SoundscapeId, volume: f32) {
        let v = volume.clamp(0.0, 1.0);
        self.volumes.insert(id, v);
        if let Some(live) = self.scapes.get(&id) {
            live.gain.gain().set_value(v);
        }
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
        if let Some(master) = &self.master {
            master.gain().set_value(self.master_volume);
        }
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Stop everything and close the context. The next
    /// `ensure_context` starts from scratch.
    pub fn shutdown(&mut self) {
        for id in SoundscapeId::ALL {
            self.deactivate(id);
        }
        self.master = None;
        if let Some(ctx) = self.ctx.take() {
            let _ = ctx.close();
        }
        log::info!("[audio] context closed");
    }
}

/// One steady tone with a slow random pitch drift: a sub-hertz LFO
/// into the oscillator's frequency param, depth scaled to the tone.
fn build_tone(
    ctx: &web::AudioContext,
    out: &web::GainNode,
    tone: &Tone,
    oscillators: &mut Vec<web::OscillatorNode>,
) {
    let Ok(osc) = create_oscillator(ctx, tone.freq) else { return };
    let Ok(level) = create_gain(ctx, tone.gain, "tone") else { return };
    let _ = osc.connect_with_audio_node(&level);
    let _ = level.connect_with_audio_node(out);

    let rate = LFO_RATE_MIN_HZ + js_sys::Math::random() as f32 * LFO_RATE_SPAN_HZ;
    if let (Ok(lfo), Ok(depth)) = (
        create_oscillator(ctx, rate),
        create_gain(ctx, tone.freq * LFO_DEPTH_RATIO, "lfo depth"),
    ) {
        let _ = lfo.connect_with_audio_node(&depth);
        let _ = depth.connect_with_audio_param(&osc.frequency());
        oscillators.push(lfo);
    }
    oscillators.push(osc);
}

/// Looping filtered noise bed for the fog-like low end.
fn build_noise_bed(
    ctx: &web::AudioContext,
    out: &web::GainNode,
    level: f32,
    amp: f32,
    lowpass_hz: f32,
    buffers: &mut Vec<web::AudioBufferSourceNode>,
) {
    let sr = ctx.sample_rate();
    let len = (sr * 2.0) as u32;
    let Ok(buffer) = ctx.create_buffer(1, len, sr) else {
        log::error!("noise buffer alloc failed");
        return;
    };
    let mut samples: Vec<f32> = vec![0.0; len as usize];
    for s in samples.iter_mut() {
        *s = (js_sys::Math::random() as f32 * 2.0 - 1.0) * amp;
    }
    let _ = buffer.copy_to_channel(&mut samples, 0);

    let Ok(src) = web::AudioBufferSourceNode::new(ctx) else { return };
    src.set_buffer(Some(&buffer));
    src.set_loop(true);

    let Ok(filter) = web::BiquadFilterNode::new(ctx) else { return };
    filter.set_type(web::BiquadFilterType::Lowpass);
    filter.frequency().set_value(lowpass_hz);

    let Ok(noise_level) = create_gain(ctx, level, "noise") else { return };
    let _ = src.connect_with_audio_node(&filter);
    let _ = filter.connect_with_audio_node(&noise_level);
    let _ = noise_level.connect_with_audio_node(out);
    buffers.push(src);
}

/// Two detuned tones hard-panned left/right through a channel merger,
/// producing the beat frequency between the ears.
fn build_binaural_pair(
    ctx: &web::AudioContext,
    out: &web::GainNode,
    base_hz: f32,
    beat_hz: f32,
    pair_gain: f32,
    oscillators: &mut Vec<web::OscillatorNode>,
) {
    let Ok(merger) = ctx.create_channel_merger(2) else {
        log::error!("ChannelMergerNode error");
        return;
    };
    let sides = [(base_hz, 0u32), (base_hz + beat_hz, 1u32)];
    for (freq, channel) in sides {
        let Ok(osc) = create_oscillator(ctx, freq) else { continue };
        let Ok(level) = create_gain(ctx, pair_gain, "binaural") else { continue };
        let _ = osc.connect_with_audio_node(&level);
        let _ = level.connect_with_audio_node_and_output_and_input(&merger, 0, channel);
        oscillators.push(osc);
    }
    let _ = merger.connect_with_audio_node(out);
}
