use std::{
    borrow::Cow,
    cell::OnceCell,
    fmt,
    rc::Rc,
};

use crate::{
    Measure,
    Span,
    Width,
    into,
};

/// A run of text together with the width it spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice<'a> {
    pub text: &'a str,
    pub width: Width,
}

impl Slice<'_> {
    pub const EMPTY: Slice<'static> = Slice {
        text: "",
        width: Width::ZERO,
    };

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

struct Measurements {
    /// Byte offset of every code unit in the source.
    offsets: Vec<usize>,
    /// Width of everything before each code unit.
    prefixes: Vec<Width>,
    total: Width,
    end: usize,
}

impl Measurements {
    fn len(&self) -> usize {
        self.prefixes.len()
    }

    fn prefix(&self, index: usize) -> Width {
        self.prefixes.get(index).copied().unwrap_or(self.total)
    }

    fn byte(&self, index: usize) -> usize {
        self.offsets.get(index).copied().unwrap_or(self.end)
    }

    fn index_of_byte(&self, byte: usize) -> usize {
        self.offsets.binary_search(&byte).unwrap_or_else(|index| index)
    }

    fn first_at_least(&self, width: Width) -> usize {
        self.prefixes
            .iter()
            .position(|&prefix| prefix >= width)
            .unwrap_or(self.len())
    }

    fn first_above(&self, width: Width) -> usize {
        self.prefixes
            .iter()
            .position(|&prefix| prefix > width)
            .unwrap_or(self.len())
    }
}

/// A string whose code units have caller-defined, non-uniform widths.
///
/// Leading and trailing whitespace is trimmed on construction. Measurement
/// happens lazily on the first width-dependent call and is cached for the
/// lifetime of the value, as is the split into [`lines`](Self::lines).
pub struct MeasuredText<M> {
    text: String,
    measure: Rc<M>,
    measurements: OnceCell<Measurements>,
    lines: OnceCell<Vec<MeasuredText<M>>>,
}

impl<M> fmt::Debug for MeasuredText<M> {
    fn fmt(&self, writer: &mut fmt::Formatter<'_>) -> fmt::Result {
        writer
            .debug_struct("MeasuredText")
            .field("text", &self.text)
            .field("width", &self.measurements.get().map(|measurements| measurements.total))
            .finish_non_exhaustive()
    }
}

impl<M> fmt::Display for MeasuredText<M> {
    fn fmt(&self, writer: &mut fmt::Formatter<'_>) -> fmt::Result {
        writer.write_str(&self.text)
    }
}

impl<M: Measure> MeasuredText<M> {
    pub fn new(text: impl AsRef<str>, measure: M) -> Self {
        Self::with_measure(text, Rc::new(measure))
    }

    pub fn with_measure(text: impl AsRef<str>, measure: Rc<M>) -> Self {
        Self {
            text: text.as_ref().trim().to_owned(),
            measure,
            measurements: OnceCell::new(),
            lines: OnceCell::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn measure(&self) -> &Rc<M> {
        &self.measure
    }

    fn measurements(&self) -> &Measurements {
        self.measurements.get_or_init(|| {
            let units = self.text.chars().collect::<Vec<_>>();

            let mut prefixes = Vec::with_capacity(units.len());
            let mut context = M::Context::default();
            let mut total = Width::ZERO;
            let mut previous = None;

            for (index, &unit) in units.iter().enumerate() {
                let width = self.measure.measure(unit, previous, &units, index, &mut context);

                prefixes.push(total);
                total += width;
                previous = Some(unit);
            }

            log::trace!(
                "measured {count} units of {text:?}, total width {total}",
                count = units.len(),
                text = self.text,
            );

            Measurements {
                offsets: self.text.char_indices().map(|(offset, _)| offset).collect(),
                prefixes,
                total,
                end: self.text.len(),
            }
        })
    }

    pub fn width(&self) -> Width {
        self.measurements().total
    }

    /// Width of the code units before `index`. Indices past the end give the
    /// total width.
    pub fn prefix_width(&self, index: usize) -> Width {
        self.measurements().prefix(index)
    }

    /// Index of the first code unit that starts at or after `width`, or the
    /// number of code units if there is none.
    pub fn index_at(&self, width: impl Into<Width>) -> usize {
        into!(width);

        self.measurements().first_at_least(width)
    }
}

// SUBSTRINGS

impl<M: Measure> MeasuredText<M> {
    /// The code units whose widths fall inside `start..end`.
    ///
    /// Negative bounds clamp to zero, an inverted range is swapped and the end
    /// clamps to the total width. Code units only partially covered at either
    /// end are left out.
    pub fn substring(&self, start: impl Into<Width>, end: impl Into<Width>) -> Slice<'_> {
        self.slice(Span::new(start, end))
    }

    pub fn substring_from(&self, start: impl Into<Width>) -> Slice<'_> {
        self.slice(Span::new(start, self.width()))
    }

    pub fn substr(&self, start: impl Into<Width>, size: impl Into<Width>) -> Slice<'_> {
        self.slice(Span::at(start, size))
    }

    fn slice(&self, span: Span) -> Slice<'_> {
        let measurements = self.measurements();
        let total = measurements.total;

        let Some(span) = span.sorted().intersect(Span::up_to(total)) else {
            return Slice::EMPTY;
        };

        if span.start >= total || span.is_empty() {
            return Slice::EMPTY;
        }

        if span.start == Width::ZERO && span.end == total {
            return Slice {
                text: &self.text,
                width: total,
            };
        }

        let from = measurements.first_at_least(span.start);
        let to = if span.end >= total {
            measurements.len()
        } else {
            // The unit straddling the end is excluded.
            measurements.first_above(span.end).saturating_sub(1).max(from)
        };

        Slice {
            text: &self.text[measurements.byte(from)..measurements.byte(to)],
            width: measurements.prefix(to) - measurements.prefix(from),
        }
    }
}

// SEARCH

impl<M: Measure> MeasuredText<M> {
    /// Index of the first occurrence of `search` starting at or after the
    /// first code unit whose prefix width is at least `after`.
    pub fn index_before_first(&self, search: &str, after: impl Into<Width>) -> Option<usize> {
        into!(after);

        let measurements = self.measurements();
        if after > measurements.total {
            return None;
        }

        let byte = measurements.byte(measurements.first_at_least(after));
        let found = self.text[byte..].find(search)?;

        Some(measurements.index_of_byte(byte + found))
    }

    pub fn width_before_first(&self, search: &str, after: impl Into<Width>) -> Option<Width> {
        self.index_before_first(search, after)
            .map(|index| self.prefix_width(index))
    }

    /// Index of the last occurrence of `search` starting at or before the last
    /// code unit whose prefix width is at most `before`. Bounds beyond the
    /// total width search from the last code unit.
    pub fn index_before_last(&self, search: &str, before: impl Into<Width>) -> Option<usize> {
        into!(before);

        if before < Width::from(1) {
            return None;
        }

        let measurements = self.measurements();
        let last = measurements.first_above(before).checked_sub(1)?;

        (0..=last)
            .rev()
            .find(|&index| self.text[measurements.byte(index)..].starts_with(search))
    }

    pub fn width_before_last(&self, search: &str, before: impl Into<Width>) -> Option<Width> {
        self.index_before_last(search, before)
            .map(|index| self.prefix_width(index))
    }
}

// LINES

impl<M: Measure> MeasuredText<M> {
    /// The text split on runs of `\r` and `\n`. Every line shares this text's
    /// measure. Empty text has a single empty line.
    pub fn lines(&self) -> &[MeasuredText<M>] {
        self.lines.get_or_init(|| {
            if self.text.is_empty() {
                return vec![Self::with_measure("", Rc::clone(&self.measure))];
            }

            self.text
                .split(['\r', '\n'])
                .filter(|line| !line.is_empty())
                .map(|line| Self::with_measure(line, Rc::clone(&self.measure)))
                .collect()
        })
    }

    pub fn max_line_width(&self) -> Width {
        self.lines()
            .iter()
            .fold(Width::ZERO, |max, line| max.max(line.width()))
    }
}

// TRUNCATION

impl<M: Measure> MeasuredText<M> {
    /// Cuts the text down to `max` and appends `suffix`, measured with this
    /// text's measure. Text that already fits is returned as is.
    pub fn truncate(&self, max: impl Into<Width>, suffix: &str) -> Cow<'_, str> {
        let suffix = Self::with_measure(suffix, Rc::clone(&self.measure));

        self.truncate_with(max, &suffix)
    }

    /// Like [`truncate`](Self::truncate) but with an already measured suffix.
    /// A suffix wider than `max` leaves nothing of the text but is still
    /// appended in full.
    pub fn truncate_with(&self, max: impl Into<Width>, suffix: &MeasuredText<M>) -> Cow<'_, str> {
        into!(max);

        if self.width() <= max {
            return Cow::Borrowed(&self.text);
        }

        let kept = self.substring(0, max - suffix.width());

        Cow::Owned(format!("{kept}{suffix}", kept = kept.text, suffix = suffix.as_str()))
    }
}
