//! Measurement of text whose code units have non-uniform widths.
//!
//! A [`MeasuredText`] maps between two coordinate spaces: code unit indices
//! and cumulative rendered width. The width of each unit comes from a
//! caller-supplied [`Measure`].

mod measure;
mod span;
mod text;
mod width;

pub use crate::{
    measure::*,
    span::*,
    text::*,
    width::*,
};

#[macro_export]
macro_rules! into {
    ($($variable:ident),*) => {
        $(
            let $variable = $variable.into();
        )*
    }
}
