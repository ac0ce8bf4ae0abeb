#![no_main]

use libfuzzer_sys::fuzz_target;
use voxform_backend::{render, FormantProcessor, RenderInput};

fn f32_at(data: &[u8], i: usize) -> f32 {
    let mut bytes = [0u8; 4];
    for (k, b) in bytes.iter_mut().enumerate() {
        *b = data.get(i * 4 + k).copied().unwrap_or(0);
    }
    f32::from_le_bytes(bytes)
}

fuzz_target!(|data: &[u8]| {
    const HEADER: usize = 12 * 4;
    if data.len() < HEADER {
        return;
    }

    let mut processor = FormantProcessor::new();
    processor.set_vowel(f32_at(data, 0));
    processor.set_q(f32_at(data, 1));
    processor.set_gain(f32_at(data, 2).clamp(-16.0, 16.0));
    processor.set_formant_morph(f32_at(data, 3));
    processor.set_brightness(f32_at(data, 4));
    processor.set_mix(f32_at(data, 5));
    processor.set_vowel_mod_depth(f32_at(data, 6));
    processor.set_brightness_mod_depth(f32_at(data, 7));
    processor.set_breath(f32_at(data, 8));
    processor.set_consonant(f32_at(data, 9), f32_at(data, 10), f32_at(data, 11));

    let samples: Vec<i16> = data[HEADER..]
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect();

    let result = render(
        &mut processor,
        RenderInput::new(&samples)
            .with_vowel_mod(&samples)
            .with_brightness_mod(&samples),
    )
    .unwrap();
    assert_eq!(result.samples.len(), samples.len());
    assert_eq!(result.dropped_blocks, 0);

    for band in processor.bank().bands() {
        assert!(band.active().is_finite());
    }
});
