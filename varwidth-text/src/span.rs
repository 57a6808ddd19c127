use std::fmt;

use crate::{
    Width,
    into,
};

/// A half-open range in width space.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Span {
    pub start: Width,
    pub end: Width,
}

impl fmt::Display for Span {
    fn fmt(&self, writer: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(writer, "{start}..{end}", start = self.start, end = self.end)
    }
}

impl Span {
    #[inline]
    pub fn new(start: impl Into<Width>, end: impl Into<Width>) -> Self {
        into!(start, end);

        Self { start, end }
    }

    #[inline]
    pub fn at(start: impl Into<Width>, len: impl Into<Width>) -> Self {
        into!(start, len);

        Self::new(start, start + len)
    }

    #[inline]
    pub fn empty(start: impl Into<Width>) -> Self {
        into!(start);

        Self::new(start, start)
    }

    #[inline]
    pub fn up_to(end: impl Into<Width>) -> Self {
        Self::new(0, end)
    }
}

impl Span {
    #[inline]
    pub fn len(self) -> Width {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Swaps the bounds if the span is inverted.
    #[inline]
    pub fn sorted(self) -> Self {
        if self.start > self.end {
            Self::new(self.end, self.start)
        } else {
            self
        }
    }

    #[inline]
    pub fn intersect(self, that: impl Into<Self>) -> Option<Self> {
        into!(that);

        let start = self.start.max(that.start);
        let end = self.end.min(that.end);

        (end >= start).then(|| Self::new(start, end))
    }
}

impl<S: Into<Width>, E: Into<Width>> From<(S, E)> for Span {
    fn from((start, end): (S, E)) -> Self {
        Self::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_swaps_inverted() {
        assert_eq!(Span::new(5, 2).sorted(), Span::new(2, 5));
        assert_eq!(Span::new(2, 5).sorted(), Span::new(2, 5));
    }

    #[test]
    fn intersect() {
        let whole = Span::up_to(8);

        assert_eq!(Span::new(-3, 4).intersect(whole), Some(Span::new(0, 4)));
        assert_eq!(Span::new(6, 12).intersect(whole), Some(Span::new(6, 8)));
        assert_eq!(Span::new(8, 12).intersect(whole), Some(Span::empty(8)));
        assert_eq!(Span::new(9, 12).intersect(whole), None);
        assert_eq!(Span::new(-3, -1).intersect(whole), None);
    }

    #[test]
    fn len() {
        assert_eq!(Span::at(1.5, 2).len(), Width::from(2));
        assert!(Span::empty(4).is_empty());
        assert_eq!(Span::from((1, 3)).to_string(), "1..3");
    }
}
