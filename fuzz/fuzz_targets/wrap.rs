#![no_main]

use libfuzzer_sys::fuzz_target;
use varwidth_text::MeasuredText;
use varwidth_wrap::Wrap;

fuzz_target!(|input: (&str, u8)| {
    let (data, width) = input;

    let text = MeasuredText::new(data, |unit: char| if unit.is_ascii() { 1 } else { 2 });

    let wrapped = Wrap::new(u16::from(width)).string(&text);

    let squash = |text: &str| text.split_whitespace().collect::<String>();
    assert_eq!(squash(&wrapped), squash(text.as_str()));
});
