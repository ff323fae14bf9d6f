//! Physical and game constants used by the launch simulation

/// Gravitational acceleration in m/s²
pub const GRAVITY_MPS2: f64 = 9.8;

/// Linear drag coefficient
///
/// Fraction of the current velocity removed per second of flight. It is
/// applied to both axes each step as `v * drag * dt`.
pub const LINEAR_DRAG_PER_S: f64 = 0.02;

/// Integration time step in seconds
pub const TIME_STEP_S: f64 = 0.01;

/// Simulated flight time cap in seconds
pub const MAX_FLIGHT_TIME_S: f64 = 10.0;

/// Ground height in meters
pub const GROUND_HEIGHT_M: f64 = 0.0;

/// Distance from the target within which a landing counts as a hit (m)
pub const HIT_RADIUS_M: f64 = 3.0;

/// Inclusive range the target's horizontal position is drawn from (m)
pub const TARGET_MIN_X_M: i32 = 30;
pub const TARGET_MAX_X_M: i32 = 70;

/// Canvas pixels of drag per m/s of launch speed
pub const DRAG_PIXELS_PER_MPS: f64 = 5.0;

/// Delay between animation frames in milliseconds
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 10;

/// Plot extents used when the flight stays short
pub const MIN_PLOT_X_M: f64 = 80.0;
pub const PLOT_MARGIN_M: f64 = 10.0;

/// Spacing of x-axis tick marks (m)
pub const PLOT_TICK_SPACING_M: f64 = 5.0;
