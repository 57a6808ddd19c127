use std::marker::PhantomData;

use crate::Width;

/// Assigns a width to each code unit of a string.
///
/// [`measure`](Measure::measure) is called exactly once per code unit, in
/// index order, the first time a width-dependent operation needs the
/// measurements. `context` is created fresh for every pass and is never shared
/// between strings, so it can carry kerning or ligature state from one unit to
/// the next.
///
/// Returning a negative width breaks the monotonicity of the prefix table and
/// the results of every operation built on top of it are unspecified.
pub trait Measure {
    type Context: Default;

    fn measure(
        &self,
        unit: char,
        previous: Option<char>,
        units: &[char],
        index: usize,
        context: &mut Self::Context,
    ) -> Width;

    /// Measures a lone unit with a fresh context.
    fn measure_unit(&self, unit: char) -> Width {
        self.measure(unit, None, &[unit], 0, &mut Default::default())
    }
}

impl<F, W> Measure for F
where
    F: Fn(char) -> W,
    W: Into<Width>,
{
    type Context = ();

    fn measure(&self, unit: char, _: Option<char>, _: &[char], _: usize, _: &mut ()) -> Width {
        self(unit).into()
    }
}

/// A [`Measure`] backed by a closure that sees the whole signature, including
/// the per-pass context. Created with [`stateful`].
pub struct Stateful<F, C, W> {
    function: F,
    context: PhantomData<fn() -> (C, W)>,
}

pub fn stateful<F, C, W>(function: F) -> Stateful<F, C, W>
where
    C: Default,
    F: Fn(char, Option<char>, &[char], usize, &mut C) -> W,
    W: Into<Width>,
{
    Stateful {
        function,
        context: PhantomData,
    }
}

impl<F, C, W> Measure for Stateful<F, C, W>
where
    C: Default,
    F: Fn(char, Option<char>, &[char], usize, &mut C) -> W,
    W: Into<Width>,
{
    type Context = C;

    fn measure(&self, unit: char, previous: Option<char>, units: &[char], index: usize, context: &mut C) -> Width {
        (self.function)(unit, previous, units, index, context).into()
    }
}
