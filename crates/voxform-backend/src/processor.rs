//! Per-block orchestration.
//!
//! Each call to [`StreamNode::update`] moves through
//! `acquire inputs -> (bypass | process) -> emit`, releasing every block it
//! obtained on every path. Nothing here allocates, locks, or logs.

use voxform_spec::FormantParams;

pub use voxform_spec::params::MIX_EPSILON;

use crate::controls::FormantControls;
use crate::excitation::{ExcitationLevels, ExcitationSynth};
use crate::filter::FormantBank;
use crate::params::ParameterController;
use crate::rng::NoiseGenerator;
use crate::stream::{
    block_mean, AudioBlock, BlockPool, StreamNode, AUDIO_PORT, BRIGHTNESS_MOD_PORT,
    VOWEL_MOD_PORT,
};
use crate::table;
use crate::SAMPLE_RATE;

/// Makeup gain for the sum of three narrow bands.
pub const WET_MAKEUP: f32 = 5.0 / 3.0;

/// Output port.
pub const OUTPUT_PORT: usize = 0;

/// Cycle counters. Exactly one field is incremented per `update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorStats {
    /// Blocks run through the resonators.
    pub processed: u64,
    /// Blocks copied through unmodified (bypass or zero mix).
    pub bypassed: u64,
    /// Cycles with no audio input block.
    pub missing_input: u64,
    /// Cycles dropped because no output block could be allocated.
    pub allocation_failures: u64,
}

impl ProcessorStats {
    /// Cycles that emitted a block.
    pub fn emitted(&self) -> u64 {
        self.processed + self.bypassed
    }

    /// Cycles that emitted nothing.
    pub fn dropped(&self) -> u64 {
        self.missing_input + self.allocation_failures
    }
}

/// Real-time formant filter node.
///
/// Inputs: port 0 audio, port 1 vowel modulation, port 2 brightness
/// modulation. Output: port 0.
#[derive(Debug)]
pub struct FormantProcessor {
    controls: FormantControls,
    params: ParameterController,
    bank: FormantBank,
    excitation: ExcitationSynth,
    stats: ProcessorStats,
}

impl FormantProcessor {
    /// Creates a processor with default parameters and zeroed state.
    pub fn new() -> Self {
        Self::with_noise(NoiseGenerator::default())
    }

    /// Creates a processor whose excitation noise starts from `seed`.
    pub fn with_noise_seed(seed: u32) -> Self {
        Self::with_noise(NoiseGenerator::new(seed))
    }

    fn with_noise(noise: NoiseGenerator) -> Self {
        Self {
            controls: FormantControls::new(),
            params: ParameterController::new(),
            bank: FormantBank::new(),
            excitation: ExcitationSynth::with_noise(noise),
            stats: ProcessorStats::default(),
        }
    }

    /// A handle for writing parameters from another thread.
    pub fn controls(&self) -> FormantControls {
        self.controls.clone()
    }

    /// Writes a whole preset.
    pub fn apply(&self, params: &FormantParams) {
        self.controls.apply(params);
    }

    /// Current parameter targets.
    pub fn targets(&self) -> FormantParams {
        self.controls.snapshot()
    }

    /// Cycle counters since construction.
    pub fn stats(&self) -> ProcessorStats {
        self.stats
    }

    /// Smoothed and processed parameter state.
    pub fn parameters(&self) -> &ParameterController {
        &self.params
    }

    /// The resonator bank.
    pub fn bank(&self) -> &FormantBank {
        &self.bank
    }

    /// See [`FormantControls::set_vowel`].
    pub fn set_vowel(&self, vowel: f32) {
        self.controls.set_vowel(vowel);
    }

    /// See [`FormantControls::set_q`].
    pub fn set_q(&self, q: f32) {
        self.controls.set_q(q);
    }

    /// See [`FormantControls::set_gain`].
    pub fn set_gain(&self, gain: f32) {
        self.controls.set_gain(gain);
    }

    /// See [`FormantControls::set_formant_morph`].
    pub fn set_formant_morph(&self, morph: f32) {
        self.controls.set_formant_morph(morph);
    }

    /// See [`FormantControls::set_brightness`].
    pub fn set_brightness(&self, semitones: f32) {
        self.controls.set_brightness(semitones);
    }

    /// See [`FormantControls::set_mix`].
    pub fn set_mix(&self, mix: f32) {
        self.controls.set_mix(mix);
    }

    /// See [`FormantControls::set_vowel_mod_depth`].
    pub fn set_vowel_mod_depth(&self, depth: f32) {
        self.controls.set_vowel_mod_depth(depth);
    }

    /// See [`FormantControls::set_brightness_mod_depth`].
    pub fn set_brightness_mod_depth(&self, depth: f32) {
        self.controls.set_brightness_mod_depth(depth);
    }

    /// See [`FormantControls::set_breath`].
    pub fn set_breath(&self, level: f32) {
        self.controls.set_breath(level);
    }

    /// See [`FormantControls::set_consonant`].
    pub fn set_consonant(&self, s_level: f32, f_level: f32, nasal: f32) {
        self.controls.set_consonant(s_level, f_level, nasal);
    }

    /// See [`FormantControls::set_bypass`].
    pub fn set_bypass(&self, bypass: bool) {
        self.controls.set_bypass(bypass);
    }

    /// Smooths parameters and retargets the resonators for one block.
    fn prepare_block(&mut self, targets: &FormantParams, mod_vowel: f32, mod_brightness: f32) {
        self.params.smooth(targets);
        self.params.modulate(targets, mod_vowel, mod_brightness);

        let frequencies = table::formants(
            self.params.proc_vowel(),
            targets.voice_morph,
            self.params.pitch_scale(),
        );
        self.bank
            .set_targets(&frequencies, self.params.q(), SAMPLE_RATE);
        self.bank.morph();
    }

    /// Runs one block of samples through excitation, the resonators, and
    /// the dry/wet mix.
    fn process_block(&mut self, input: &AudioBlock, output: &mut AudioBlock, targets: &FormantParams) {
        let wet_gain = targets.gain * self.params.comp_gain() * WET_MAKEUP;
        let mix = targets.mix;
        let levels = ExcitationLevels {
            breath: targets.breath,
            sibilance: targets.consonant.s,
            fricative: targets.consonant.f,
            nasal: targets.consonant.nasal,
        };

        for (out, &sample) in output.iter_mut().zip(input) {
            let x = sample as f32 / 32_768.0;
            let excited = self.excitation.excite(x, &levels);
            let wet = self.bank.process(excited) * wet_gain;
            let y = (excited * (1.0 - mix) + wet * mix).clamp(-1.0, 1.0);
            *out = (y * 32_767.0) as i16;
        }
    }
}

impl Default for FormantProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases whichever of the optional blocks were acquired.
fn release_all<P: BlockPool>(pool: &mut P, blocks: [Option<P::Block>; 2]) {
    for block in blocks.into_iter().flatten() {
        pool.release(block);
    }
}

impl StreamNode for FormantProcessor {
    const INPUTS: usize = 3;

    fn update<P: BlockPool>(&mut self, pool: &mut P) {
        let input = pool.receive_read_only(AUDIO_PORT);
        let vowel_mod = pool.receive_read_only(VOWEL_MOD_PORT);
        let brightness_mod = pool.receive_read_only(BRIGHTNESS_MOD_PORT);

        let Some(input) = input else {
            release_all(pool, [vowel_mod, brightness_mod]);
            self.stats.missing_input += 1;
            return;
        };

        let targets = self.controls.snapshot();

        if targets.is_bypassed() {
            match pool.allocate() {
                Some(mut output) => {
                    output.as_mut().copy_from_slice(input.as_ref());
                    pool.transmit(&output, OUTPUT_PORT);
                    pool.release(output);
                    self.stats.bypassed += 1;
                }
                None => self.stats.allocation_failures += 1,
            }
            pool.release(input);
            release_all(pool, [vowel_mod, brightness_mod]);
            return;
        }

        let mod_vowel = vowel_mod
            .as_ref()
            .map_or(0.0, |block| block_mean(block.as_ref()));
        let mod_brightness = brightness_mod
            .as_ref()
            .map_or(0.0, |block| block_mean(block.as_ref()));

        self.prepare_block(&targets, mod_vowel, mod_brightness);

        let Some(mut output) = pool.allocate() else {
            pool.release(input);
            release_all(pool, [vowel_mod, brightness_mod]);
            self.stats.allocation_failures += 1;
            return;
        };

        self.process_block(input.as_ref(), output.as_mut(), &targets);
        pool.transmit(&output, OUTPUT_PORT);

        pool.release(output);
        pool.release(input);
        release_all(pool, [vowel_mod, brightness_mod]);
        self.stats.processed += 1;
    }
}
