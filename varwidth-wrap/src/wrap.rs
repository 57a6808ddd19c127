use std::{
    borrow::Cow,
    fmt,
};

use varwidth_text::{
    Measure,
    MeasuredText,
    Width,
    into,
};

use crate::LINE_WIDTH_MAX;

/// Greedy word wrapping parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Wrap {
    width: Width,
    separator: char,
    line_break: Cow<'static, str>,
}

impl Default for Wrap {
    /// Wraps to the width of the terminal.
    fn default() -> Self {
        Self::new(*LINE_WIDTH_MAX)
    }
}

impl Wrap {
    pub fn new(width: impl Into<Width>) -> Self {
        into!(width);

        Self {
            width,
            separator: ' ',
            line_break: Cow::Borrowed("\n"),
        }
    }

    pub fn width(&self) -> Width {
        self.width
    }

    /// Sets the unit rows are preferably broken at and words are joined with.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_line_break(mut self, line_break: impl Into<Cow<'static, str>>) -> Self {
        self.line_break = line_break.into();
        self
    }
}

impl Wrap {
    /// Lays every line of `text` out into rows no wider than the configured
    /// width, breaking at the last separator that fits. Words that do not fit
    /// a row of their own are split at whatever width remains. Source lines
    /// are reflowed: the end of one line and the start of the next may share a
    /// row.
    pub fn write<M: Measure>(&self, writer: &mut dyn fmt::Write, text: &MeasuredText<M>) -> fmt::Result {
        let mut separator = [0; 4];
        let separator = &*self.separator.encode_utf8(&mut separator);
        let separator_width = text.measure().measure_unit(self.separator);

        let lines = text.lines();

        log::debug!(
            "wrapping {count} lines to width {width}",
            count = lines.len(),
            width = self.width,
        );

        let mut remaining = self.width;
        // Whether the current row already holds the tail of a previous line.
        let mut leftover = false;

        let pending = |leftover: bool| if leftover { separator_width } else { Width::ZERO };

        for line in lines {
            let line_width = line.width();
            let mut offset = Width::ZERO;

            while line_width - offset + pending(leftover) > remaining {
                if offset >= line_width && !leftover {
                    break;
                }

                let found = line
                    .index_before_last(separator, offset + remaining - pending(leftover))
                    .filter(|&index| line.prefix_width(index) >= offset && line.prefix_width(index + 1) > offset);

                match found {
                    Some(index) => {
                        if leftover {
                            writer.write_str(separator)?;
                            remaining -= separator_width;
                        }

                        let word = line.substring(offset, line.prefix_width(index));
                        writer.write_str(word.text.trim())?;

                        offset = line.prefix_width(index + 1);
                    },

                    None if !leftover => {
                        log::debug!("forcing a break at width {offset} of {line:?}", line = line.as_str());

                        let next = next_boundary(line, offset);

                        let mut part = line.substr(offset, remaining.max(Width::ZERO));
                        if part.width <= Width::ZERO {
                            // A unit wider than the whole row gets a row of its own.
                            if next >= line_width {
                                break;
                            }

                            part = line.substring(offset, next);
                        }

                        writer.write_str(part.text.trim())?;

                        offset = (offset + part.width).max(next);
                    },

                    // Let the tail of the previous line end the row instead of
                    // splitting a word right after it.
                    None => {},
                }

                writer.write_str(&self.line_break)?;
                remaining = self.width;
                leftover = false;
            }

            let rest = line.substring_from(offset);

            if leftover {
                writer.write_str(separator)?;
                remaining -= separator_width;
            }

            writer.write_str(rest.text.trim())?;

            leftover = true;
            remaining -= line_width - offset;
        }

        Ok(())
    }

    pub fn string<M: Measure>(&self, text: &MeasuredText<M>) -> String {
        let mut wrapped = String::new();
        self.write(&mut wrapped, text).ok();
        wrapped
    }

    pub fn rows<M: Measure>(&self, text: &MeasuredText<M>) -> Vec<String> {
        self.string(text)
            .split(&*self.line_break)
            .map(ToOwned::to_owned)
            .collect()
    }

    pub fn height<M: Measure>(&self, text: &MeasuredText<M>) -> usize {
        self.rows(text).len()
    }
}

/// The smallest prefix width past `offset`.
fn next_boundary<M: Measure>(line: &MeasuredText<M>, offset: Width) -> Width {
    let total = line.width();

    (line.index_at(offset)..)
        .map(|index| line.prefix_width(index + 1))
        .find(|&width| width > offset || width >= total)
        .unwrap_or(total)
}

pub fn wrap<M: Measure>(text: &MeasuredText<M>, width: impl Into<Width>) -> String {
    Wrap::new(width).string(text)
}

pub fn wrapln<M: Measure>(writer: &mut dyn fmt::Write, text: &MeasuredText<M>, width: impl Into<Width>) -> fmt::Result {
    Wrap::new(width).write(writer, text)?;
    writeln!(writer)
}

pub trait WrapExt {
    fn wrap(&self, width: impl Into<Width>) -> String;
}

impl<M: Measure> WrapExt for MeasuredText<M> {
    fn wrap(&self, width: impl Into<Width>) -> String {
        wrap(self, width)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use unicode_width::UnicodeWidthChar as _;

    use super::*;

    type Measured = MeasuredText<fn(char) -> usize>;

    fn counted(text: &str) -> Measured {
        Measured::new(text, |_| 1)
    }

    fn cells(text: &str) -> Measured {
        Measured::new(text, |unit| unit.width().unwrap_or(0))
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    macro_rules! assert_wraps {
        ($text:expr, $width:expr, $expected:literal) => {{
            init();

            assert_eq!(wrap(&$text, $width), $expected);
        }};
    }

    #[test]
    fn breaks_at_last_fitting_separator() {
        assert_wraps!(counted("ab cd ef"), 5, "ab cd\nef");
        assert_wraps!(counted("one two three four"), 9, "one two\nthree\nfour");
    }

    #[test]
    fn fitting_text_is_untouched() {
        assert_wraps!(counted("hello world"), 20, "hello world");
        assert_wraps!(counted("hello world"), 11, "hello world");
        assert_wraps!(counted(""), 4, "");
    }

    #[test]
    fn forces_breaks_without_separator() {
        assert_wraps!(counted("abcdefgh"), 3, "abc\ndef\ngh");
        assert_wraps!(counted("abcdef gh"), 3, "abc\ndef\ngh");
    }

    #[test]
    fn reflows_source_lines() {
        assert_wraps!(counted("ab\ncd"), 10, "ab cd");
        assert_wraps!(counted("aa\nbb cc dd"), 6, "aa bb\ncc dd");
        assert_wraps!(counted("one\r\n\r\ntwo"), 80, "one two");
    }

    #[test]
    fn tail_of_previous_line_ends_the_row() {
        assert_wraps!(counted("aaaa\nbb"), 5, "aaaa\nbb");
        assert_wraps!(counted("a\nbcdefgh"), 3, "a\nbcd\nefg\nh");
    }

    #[test]
    fn units_wider_than_the_row() {
        assert_wraps!(cells("你好"), 1, "你\n好");
        assert_wraps!(cells("你好 世界"), 5, "你好\n世界");
        assert_wraps!(cells("你好世界"), 5, "你好\n世界");
    }

    #[test]
    fn zero_width_units_do_not_stall() {
        assert_wraps!(cells("\u{200B}ab"), 0.5, "\u{200B}a\nb");
    }

    #[test]
    fn negative_width_gives_every_unit_a_row() {
        assert_wraps!(counted("abcdef"), -2, "a\nb\nc\nd\ne\nf");
        assert_wraps!(counted("abcdef"), 0, "a\nb\nc\nd\ne\nf");
    }

    #[test]
    fn separator_width_is_measured() {
        let half_space = |text: &str| MeasuredText::new(text, |unit: char| if unit == ' ' { 0.5 } else { 1.0 });

        assert_wraps!(half_space("ab cd"), 4, "ab\ncd");
        assert_wraps!(half_space("ab\ncd"), 4.5, "ab cd");
    }

    #[test]
    fn configuration() {
        let text = counted("alpha-beta-gamma");
        let wrap = Wrap::new(11).with_separator('-').with_line_break("<br>");

        assert_eq!(wrap.string(&text), "alpha-beta<br>gamma");
        assert_eq!(wrap.rows(&text), ["alpha-beta", "gamma"]);
        assert_eq!(wrap.height(&text), 2);
        assert_eq!(Wrap::default().width(), *LINE_WIDTH_MAX);
    }

    #[test]
    fn writers() {
        let text = counted("ab cd ef");

        let mut written = String::new();
        wrapln(&mut written, &text, 5).unwrap();
        assert_eq!(written, "ab cd\nef\n");

        assert_eq!(text.wrap(2), "ab\ncd\nef");
    }

    proptest! {
        #[test]
        fn rows_fit_and_keep_every_word(source in "[a-z]{1,6}([ \n][a-z]{1,6}){0,12}", width in 1u32..20) {
            let text = counted(&source);
            let wrapped = wrap(&text, width);

            for row in wrapped.split('\n') {
                prop_assert!(counted(row).width() <= Width::from(width), "{row:?} is wider than {width}");
            }

            let squash = |text: &str| text.split_whitespace().collect::<String>();
            prop_assert_eq!(squash(&wrapped), squash(&source));
        }

        #[test]
        fn rows_fit_unless_a_single_unit_is_wider(source in "[a-z你]{1,6}([ \n][a-z你]{1,6}){0,12}", width in 1u32..12) {
            let wide = |text: &str| MeasuredText::new(text, |unit: char| if unit.is_ascii() { 1 } else { 2 });
            let wrapped = wrap(&wide(&source), width);

            for row in wrapped.split('\n') {
                prop_assert!(
                    wide(row).width() <= Width::from(width) || row.chars().count() == 1,
                    "{row:?} is wider than {width}"
                );
            }

            let squash = |text: &str| text.split_whitespace().collect::<String>();
            prop_assert_eq!(squash(&wrapped), squash(&source));
        }

        #[test]
        fn words_that_fit_are_never_split(source in "[a-z]{1,5}( [a-z]{1,5}){0,12}", width in 5u32..20) {
            let wrapped = wrap(&counted(&source), width);

            let words = wrapped.split(['\n', ' ']).collect::<Vec<_>>();
            let expected = source.split(' ').collect::<Vec<_>>();

            prop_assert_eq!(words, expected);
        }
    }
}
