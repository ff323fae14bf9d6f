//! Explicit Euler trajectory integration under gravity, linear drag and wind.
//!
//! `Flight` produces samples lazily so an animation can pull them at its own
//! cadence; `integrate` runs a flight to completion.

use nalgebra::Vector2;

use crate::constants::GROUND_HEIGHT_M;
use crate::params::{Environment, SimulationParameters};

/// Where a sample sits in the flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Airborne,
    /// First sample below ground
    Impact,
    /// Last sample of the step budget, still airborne
    TimeLimit,
}

/// One integration step's state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub step: usize,
    pub time: f64,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub kind: SampleKind,
}

impl TrajectorySample {
    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn is_terminal(&self) -> bool {
        self.kind != SampleKind::Airborne
    }
}

/// Restartable lazy flight
#[derive(Debug, Clone)]
pub struct Flight {
    environment: Environment,
    initial_velocity: Vector2<f64>,
    max_samples: usize,
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    step: usize,
    finished: bool,
}

impl Flight {
    pub fn new(params: &SimulationParameters) -> Self {
        let environment = params.environment;
        let initial_velocity = params.initial_velocity();
        Self {
            environment,
            initial_velocity,
            max_samples: environment.max_samples(),
            position: Vector2::zeros(),
            velocity: initial_velocity,
            step: 0,
            finished: false,
        }
    }

    /// Rewind to the launch point
    pub fn restart(&mut self) {
        self.position = Vector2::zeros();
        self.velocity = self.initial_velocity;
        self.step = 0;
        self.finished = false;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn advance(&mut self) {
        let Environment { gravity, drag, time_step: dt, .. } = self.environment;
        let (vx, vy) = (self.velocity.x, self.velocity.y);

        // Drag on vy uses the pre-update value, applied alongside gravity
        self.velocity = Vector2::new(
            vx * (1.0 - drag * dt),
            vy - gravity * dt - vy * drag * dt,
        );
        self.position += self.velocity * dt;
    }
}

impl Iterator for Flight {
    type Item = TrajectorySample;

    fn next(&mut self) -> Option<TrajectorySample> {
        if self.finished {
            return None;
        }

        if self.step > 0 {
            self.advance();
        }

        let kind = if self.step > 0 && self.position.y < GROUND_HEIGHT_M {
            SampleKind::Impact
        } else if self.step + 1 >= self.max_samples {
            SampleKind::TimeLimit
        } else {
            SampleKind::Airborne
        };

        let sample = TrajectorySample {
            step: self.step,
            time: self.step as f64 * self.environment.time_step,
            position: self.position,
            velocity: self.velocity,
            kind,
        };

        self.step += 1;
        self.finished = sample.is_terminal();
        Some(sample)
    }
}

/// Completed flight
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub(crate) fn from_samples(samples: Vec<TrajectorySample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&TrajectorySample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    /// True when the flight ended below ground rather than on the time cap
    pub fn landed(&self) -> bool {
        matches!(self.last(), Some(s) if s.kind == SampleKind::Impact)
    }

    /// Last in-bounds position: the sample before impact, or the final
    /// sample when the flight ran out of time
    pub fn landing_point(&self) -> Vector2<f64> {
        match self.samples.as_slice() {
            [.., before, last] if last.kind == SampleKind::Impact => before.position,
            [.., last] => last.position,
            [] => Vector2::zeros(),
        }
    }

    pub fn max_height(&self) -> f64 {
        self.samples.iter().map(|s| s.y()).fold(0.0, f64::max)
    }

    pub fn max_distance(&self) -> f64 {
        self.samples.iter().map(|s| s.x()).fold(0.0, f64::max)
    }

    pub fn time_of_flight(&self) -> f64 {
        self.last().map_or(0.0, |s| s.time)
    }

    pub fn impact_speed(&self) -> f64 {
        self.last().map_or(0.0, |s| s.velocity.norm())
    }
}

/// Run a flight to completion
pub fn integrate(params: &SimulationParameters) -> Trajectory {
    Trajectory::from_samples(Flight::new(params).collect())
}
