//! Target placement.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{GROUND_HEIGHT_M, TARGET_MAX_X_M, TARGET_MIN_X_M};

/// Ground target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub x: f64,
    pub y: f64,
}

impl Target {
    pub fn at(x: f64) -> Self {
        Self { x, y: GROUND_HEIGHT_M }
    }
}

/// Inclusive integer range of target positions (m)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRange {
    min: i32,
    max: i32,
}

impl TargetRange {
    pub fn new(min: i32, max: i32) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min as f64 && x <= self.max as f64
    }
}

impl Default for TargetRange {
    fn default() -> Self {
        Self { min: TARGET_MIN_X_M, max: TARGET_MAX_X_M }
    }
}

/// Source of a fresh target for each launch
pub trait TargetPlacer {
    fn place(&mut self) -> Target;
}

/// Uniformly random whole-meter targets
#[derive(Debug, Clone)]
pub struct RandomPlacer<R: Rng> {
    rng: R,
    range: TargetRange,
}

impl<R: Rng> RandomPlacer<R> {
    pub fn new(rng: R, range: TargetRange) -> Self {
        Self { rng, range }
    }
}

impl RandomPlacer<StdRng> {
    pub fn seeded(seed: u64, range: TargetRange) -> Self {
        Self::new(StdRng::seed_from_u64(seed), range)
    }

    pub fn from_entropy(range: TargetRange) -> Self {
        Self::new(StdRng::from_entropy(), range)
    }
}

impl<R: Rng> TargetPlacer for RandomPlacer<R> {
    fn place(&mut self) -> Target {
        let x = self.rng.gen_range(self.range.min..=self.range.max);
        Target::at(x as f64)
    }
}

/// Same target every launch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPlacer(pub Target);

impl TargetPlacer for FixedPlacer {
    fn place(&mut self) -> Target {
        self.0
    }
}

impl<P: TargetPlacer + ?Sized> TargetPlacer for Box<P> {
    fn place(&mut self) -> Target {
        (**self).place()
    }
}
