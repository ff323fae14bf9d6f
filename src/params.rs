//! Launch parameters, the fixed physics environment, and input validation.

use nalgebra::Vector2;

use crate::constants::{
    DRAG_PIXELS_PER_MPS, GRAVITY_MPS2, LINEAR_DRAG_PER_S, MAX_FLIGHT_TIME_S, TIME_STEP_S,
};
use crate::error::InputError;

/// Physics constants the integrator runs with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub gravity: f64,     // m/s²
    pub drag: f64,        // 1/s
    pub time_step: f64,   // s
    pub max_time: f64,    // s
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            gravity: GRAVITY_MPS2,
            drag: LINEAR_DRAG_PER_S,
            time_step: TIME_STEP_S,
            max_time: MAX_FLIGHT_TIME_S,
        }
    }
}

impl Environment {
    /// Maximum number of trajectory samples, origin included.
    ///
    /// Never less than 2 so every flight takes at least one step.
    pub fn max_samples(&self) -> usize {
        let samples = (self.max_time / self.time_step).round();
        if samples.is_finite() && samples >= 2.0 {
            samples as usize
        } else {
            2
        }
    }
}

/// Validated launch parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub speed: f64,        // m/s
    pub angle_deg: f64,    // degrees above horizontal
    pub wind: f64,         // m/s, added to horizontal velocity
    pub mass: f64,         // kg, reported only; not part of the dynamics
    pub environment: Environment,
}

impl SimulationParameters {
    pub fn new(speed: f64, angle_deg: f64, wind: f64, mass: f64) -> Result<Self, InputError> {
        Ok(Self {
            speed: ensure_finite("speed", speed)?,
            angle_deg: ensure_finite("angle", angle_deg)?,
            wind: ensure_finite("wind", wind)?,
            mass: ensure_finite("mass", mass)?,
            environment: Environment::default(),
        })
    }

    /// Launch from a canvas drag gesture
    pub fn from_drag(gesture: DragGesture, wind: f64, mass: f64) -> Result<Self, InputError> {
        Self::new(gesture.launch_speed(), gesture.launch_angle_deg(), wind, mass)
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Initial velocity vector with the wind folded into the x component
    pub fn initial_velocity(&self) -> Vector2<f64> {
        let angle = self.angle_deg.to_radians();
        Vector2::new(
            self.speed * angle.cos() + self.wind,
            self.speed * angle.sin(),
        )
    }
}

fn ensure_finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NotFinite { field, value })
    }
}

/// Parse one numeric form field
pub fn parse_field(field: &'static str, raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Missing { field });
    }
    let value: f64 = trimmed.parse().map_err(|_| InputError::NotANumber {
        field,
        value: trimmed.to_string(),
    })?;
    ensure_finite(field, value)
}

/// Raw launch form as typed by the user
#[derive(Debug, Clone, Copy)]
pub struct LaunchForm<'a> {
    pub speed: &'a str,
    pub angle: &'a str,
    pub mass: &'a str,
    pub wind: &'a str,
}

impl<'a> LaunchForm<'a> {
    /// Validate every field; the first bad field is reported
    pub fn parse(&self) -> Result<SimulationParameters, InputError> {
        let speed = parse_field("speed", self.speed)?;
        let angle = parse_field("angle", self.angle)?;
        let mass = parse_field("mass", self.mass)?;
        let wind = parse_field("wind", self.wind)?;
        SimulationParameters::new(speed, angle, wind, mass)
    }
}

/// Pointer drag on the launch canvas, in pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

impl DragGesture {
    pub fn new(start: (f64, f64), end: (f64, f64)) -> Self {
        Self { start, end }
    }

    fn deltas(&self) -> (f64, f64) {
        let dx = self.end.0 - self.start.0;
        let dy = self.start.1 - self.end.1;
        (dx, dy)
    }

    pub fn launch_speed(&self) -> f64 {
        let (dx, dy) = self.deltas();
        dx.hypot(dy) / DRAG_PIXELS_PER_MPS
    }

    pub fn launch_angle_deg(&self) -> f64 {
        let (dx, dy) = self.deltas();
        dy.atan2(dx).to_degrees()
    }
}
