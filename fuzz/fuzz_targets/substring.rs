#![no_main]

use libfuzzer_sys::fuzz_target;
use varwidth_text::{
    MeasuredText,
    Width,
};

fuzz_target!(|input: (&str, f32, f32)| {
    let (data, start, end) = input;

    let text = MeasuredText::new(data, |unit: char| if unit.is_ascii() { 1 } else { 2 });

    let slice = text.substring(start, end);
    assert!(slice.width >= Width::ZERO);
    assert!(text.as_str().contains(slice.text));

    if let Some(at) = text.width_before_first(" ", start) {
        assert!(at <= text.width());
    }

    if let Some(at) = text.width_before_last(" ", end) {
        assert!(at <= text.width());
    }
});
