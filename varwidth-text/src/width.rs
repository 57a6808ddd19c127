use std::{
    fmt,
    num::ParseFloatError,
    ops,
    str,
};

use crate::into;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WidthError {
    #[error("invalid width: {0}")]
    Parse(#[from] ParseFloatError),

    #[error("width must be finite, got {0}")]
    NotFinite(String),

    #[error("width must not be negative, got {0}")]
    Negative(String),
}

/// A rendered width. Used both as a measure and as a coordinate, so it may
/// hold negative values which the operations taking it clamp.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Width(f64);

impl Width {
    pub const ZERO: Self = Self(0.0);

    pub fn new(width: impl Into<Width>) -> Self {
        into!(width);
        width
    }

    /// Validates a caller-facing width, rejecting NaN, infinities and
    /// negative values.
    pub fn try_finite(width: f64) -> Result<Self, WidthError> {
        if !width.is_finite() {
            return Err(WidthError::NotFinite(width.to_string()));
        }

        if width < 0.0 {
            return Err(WidthError::Negative(width.to_string()));
        }

        Ok(Self(width))
    }

    #[inline]
    pub fn max(self, that: impl Into<Self>) -> Self {
        into!(that);

        if that > self { that } else { self }
    }

    #[inline]
    pub fn min(self, that: impl Into<Self>) -> Self {
        into!(that);

        if that < self { that } else { self }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, writer: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, writer)
    }
}

impl str::FromStr for Width {
    type Err = WidthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_finite(s.trim().parse()?)
    }
}

// OPERATIONS

impl<I: Into<Self>> ops::Add<I> for Width {
    type Output = Self;

    fn add(self, that: I) -> Self::Output {
        Self(*self + *that.into())
    }
}

impl<I: Into<Self>> ops::Sub<I> for Width {
    type Output = Self;

    fn sub(self, that: I) -> Self::Output {
        Self(*self - *that.into())
    }
}

impl<I> ops::AddAssign<I> for Width
where
    Self: ops::Add<I, Output = Self>,
{
    fn add_assign(&mut self, rhs: I) {
        *self = *self + rhs
    }
}

impl<I> ops::SubAssign<I> for Width
where
    Self: ops::Sub<I, Output = Self>,
{
    fn sub_assign(&mut self, rhs: I) {
        *self = *self - rhs
    }
}

impl ops::Deref for Width {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// FLOAT CONVERSIONS

impl From<Width> for f64 {
    fn from(this: Width) -> Self {
        *this
    }
}

impl From<f64> for Width {
    fn from(that: f64) -> Self {
        Self(that)
    }
}

impl From<f32> for Width {
    fn from(that: f32) -> Self {
        Self(that.into())
    }
}

// INTEGER CONVERSIONS

impl From<i32> for Width {
    fn from(that: i32) -> Self {
        Self(that.into())
    }
}

impl From<u16> for Width {
    fn from(that: u16) -> Self {
        Self(that.into())
    }
}

impl From<u32> for Width {
    fn from(that: u32) -> Self {
        Self(that.into())
    }
}

impl From<usize> for Width {
    fn from(that: usize) -> Self {
        Self(that as f64)
    }
}
