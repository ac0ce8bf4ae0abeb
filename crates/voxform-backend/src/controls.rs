//! Lock-free parameter targets.
//!
//! Setters may run on a control thread while the audio callback reads the
//! same values. Each parameter is an independent atomic scalar (an `f32`
//! stored as its bit pattern) accessed with relaxed ordering: the last
//! write wins and a block may observe a mix of old and new values, which
//! the per-block smoothing absorbs.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use voxform_spec::params::{
    ParamRange, BRIGHTNESS_MOD_DEPTH_RANGE, BRIGHTNESS_RANGE, LEVEL_RANGE, MIX_RANGE, Q_RANGE,
    VOICE_MORPH_RANGE, VOWEL_MOD_DEPTH_RANGE, VOWEL_RANGE,
};
use voxform_spec::{ConsonantLevels, FormantParams};

/// An `f32` in an `AtomicU32`.
#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

#[derive(Debug)]
struct SharedTargets {
    vowel: AtomicF32,
    q: AtomicF32,
    gain: AtomicF32,
    voice_morph: AtomicF32,
    brightness: AtomicF32,
    mix: AtomicF32,
    vowel_mod_depth: AtomicF32,
    brightness_mod_depth: AtomicF32,
    breath: AtomicF32,
    consonant_s: AtomicF32,
    consonant_f: AtomicF32,
    consonant_nasal: AtomicF32,
    bypass: AtomicBool,
}

impl SharedTargets {
    fn new(params: &FormantParams) -> Self {
        let p = params.clamped();
        Self {
            vowel: AtomicF32::new(p.vowel),
            q: AtomicF32::new(p.q),
            gain: AtomicF32::new(p.gain),
            voice_morph: AtomicF32::new(p.voice_morph),
            brightness: AtomicF32::new(p.brightness),
            mix: AtomicF32::new(p.mix),
            vowel_mod_depth: AtomicF32::new(p.vowel_mod_depth),
            brightness_mod_depth: AtomicF32::new(p.brightness_mod_depth),
            breath: AtomicF32::new(p.breath),
            consonant_s: AtomicF32::new(p.consonant.s),
            consonant_f: AtomicF32::new(p.consonant.f),
            consonant_nasal: AtomicF32::new(p.consonant.nasal),
            bypass: AtomicBool::new(p.bypass),
        }
    }
}

/// Stores `value` clamped to `range`; non-finite input is ignored.
#[inline]
fn store_clamped(slot: &AtomicF32, value: f32, range: ParamRange) {
    if value.is_finite() {
        slot.store(range.clamp(value));
    }
}

/// Cloneable handle to a processor's parameter targets.
///
/// Every numeric setter clamps into the parameter's range and ignores NaN
/// and infinities, so the targets always hold valid values.
#[derive(Debug, Clone)]
pub struct FormantControls {
    inner: Arc<SharedTargets>,
}

impl FormantControls {
    /// Creates controls holding the default parameters.
    pub fn new() -> Self {
        Self::with_params(&FormantParams::default())
    }

    /// Creates controls holding `params` (clamped).
    pub fn with_params(params: &FormantParams) -> Self {
        Self {
            inner: Arc::new(SharedTargets::new(params)),
        }
    }

    /// Sets the vowel position (0.0 = A ... 4.0 = U).
    pub fn set_vowel(&self, vowel: f32) {
        store_clamped(&self.inner.vowel, vowel, VOWEL_RANGE);
    }

    /// Sets the resonance (0.1-30.0).
    pub fn set_q(&self, q: f32) {
        store_clamped(&self.inner.q, q, Q_RANGE);
    }

    /// Sets the wet gain multiplier. Any finite value is accepted.
    pub fn set_gain(&self, gain: f32) {
        if gain.is_finite() {
            self.inner.gain.store(gain);
        }
    }

    /// Sets the voice-type morph (0.0 = male, 0.5 = female, 1.0 = child).
    pub fn set_formant_morph(&self, morph: f32) {
        store_clamped(&self.inner.voice_morph, morph, VOICE_MORPH_RANGE);
    }

    /// Sets the brightness offset in semitones (-24.0-24.0).
    pub fn set_brightness(&self, semitones: f32) {
        store_clamped(&self.inner.brightness, semitones, BRIGHTNESS_RANGE);
    }

    /// Sets the dry/wet mix (0.0 = dry, 1.0 = wet).
    pub fn set_mix(&self, mix: f32) {
        store_clamped(&self.inner.mix, mix, MIX_RANGE);
    }

    /// Sets the vowel modulation depth in vowel units (0.0-4.0).
    pub fn set_vowel_mod_depth(&self, depth: f32) {
        store_clamped(&self.inner.vowel_mod_depth, depth, VOWEL_MOD_DEPTH_RANGE);
    }

    /// Sets the brightness modulation depth in semitones (0.0-48.0).
    pub fn set_brightness_mod_depth(&self, depth: f32) {
        store_clamped(
            &self.inner.brightness_mod_depth,
            depth,
            BRIGHTNESS_MOD_DEPTH_RANGE,
        );
    }

    /// Sets the breath noise level (0.0-1.0).
    pub fn set_breath(&self, level: f32) {
        store_clamped(&self.inner.breath, level, LEVEL_RANGE);
    }

    /// Sets the sibilance, fricative, and nasal levels (each 0.0-1.0).
    pub fn set_consonant(&self, s_level: f32, f_level: f32, nasal: f32) {
        store_clamped(&self.inner.consonant_s, s_level, LEVEL_RANGE);
        store_clamped(&self.inner.consonant_f, f_level, LEVEL_RANGE);
        store_clamped(&self.inner.consonant_nasal, nasal, LEVEL_RANGE);
    }

    /// Enables or disables bypass.
    pub fn set_bypass(&self, bypass: bool) {
        self.inner.bypass.store(bypass, Ordering::Relaxed);
    }

    /// Writes a whole preset through the setters.
    pub fn apply(&self, params: &FormantParams) {
        self.set_vowel(params.vowel);
        self.set_q(params.q);
        self.set_gain(params.gain);
        self.set_formant_morph(params.voice_morph);
        self.set_brightness(params.brightness);
        self.set_mix(params.mix);
        self.set_vowel_mod_depth(params.vowel_mod_depth);
        self.set_brightness_mod_depth(params.brightness_mod_depth);
        self.set_breath(params.breath);
        self.set_consonant(
            params.consonant.s,
            params.consonant.f,
            params.consonant.nasal,
        );
        self.set_bypass(params.bypass);
    }

    /// Reads every target once.
    pub fn snapshot(&self) -> FormantParams {
        let t = &self.inner;
        FormantParams {
            vowel: t.vowel.load(),
            q: t.q.load(),
            gain: t.gain.load(),
            voice_morph: t.voice_morph.load(),
            brightness: t.brightness.load(),
            mix: t.mix.load(),
            vowel_mod_depth: t.vowel_mod_depth.load(),
            brightness_mod_depth: t.brightness_mod_depth.load(),
            breath: t.breath.load(),
            consonant: ConsonantLevels {
                s: t.consonant_s.load(),
                f: t.consonant_f.load(),
                nasal: t.consonant_nasal.load(),
            },
            bypass: t.bypass.load(Ordering::Relaxed),
        }
    }
}

impl Default for FormantControls {
    fn default() -> Self {
        Self::new()
    }
}
