//! # Projectile Game
//!
//! Launch mini-game core: explicit Euler trajectory integration under gravity,
//! linear drag and wind, hit/miss evaluation against a ground target, and a
//! session that keeps score.

// Re-export the main types and functions
pub use config::GameConfig;
pub use error::{ConfigError, InputError};
pub use outcome::{evaluate, landing_distance, Outcome};
pub use params::{parse_field, DragGesture, Environment, LaunchForm, SimulationParameters};
pub use render::{outcome_message, render_frame, Plot, PlotBounds};
pub use session::{GameSession, Launch, LaunchReport, Score};
pub use target::{FixedPlacer, RandomPlacer, Target, TargetPlacer, TargetRange};
pub use trajectory::{integrate, Flight, SampleKind, Trajectory, TrajectorySample};

// Module declarations
pub mod constants;
pub mod config;
mod error;
pub mod outcome;
pub mod params;
pub mod render;
pub mod session;
pub mod target;
pub mod trajectory;
