//! Greedy word wrapping of [`MeasuredText`](varwidth_text::MeasuredText).

mod wrap;

use std::sync::LazyLock;

use varwidth_text::Width;

pub use crate::wrap::*;

/// The width [`Wrap::default`] wraps to: the terminal's column count, or 120
/// when there is no terminal.
pub static LINE_WIDTH_MAX: LazyLock<Width> =
    LazyLock::new(|| terminal_size::terminal_size().map(|(width, _)| width.0).unwrap_or(120).into());
