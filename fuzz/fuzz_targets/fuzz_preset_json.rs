#![no_main]

use libfuzzer_sys::fuzz_target;
use voxform_spec::FormantParams;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(params) = FormantParams::from_json(text) else {
        return;
    };

    let result = params.validate();
    let clamped = params.clamped();

    // Clamping must produce a preset with nothing left to report.
    let recheck = clamped.validate();
    assert!(recheck.is_ok());
    assert!(recheck
        .warnings
        .iter()
        .all(|w| w.code != voxform_spec::WarningCode::OutOfRange));
    if result.warnings.is_empty() && result.is_ok() {
        assert_eq!(clamped, params);
    }

    let json = clamped.to_json_pretty().unwrap();
    assert_eq!(FormantParams::from_json(&json).unwrap(), clamped);
});
