//! Hit/miss evaluation of a finished trajectory against a ground target.

use std::fmt;

use crate::trajectory::Trajectory;

/// Result of a launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Hit,
    Miss,
}

impl Outcome {
    pub fn is_hit(self) -> bool {
        self == Outcome::Hit
    }

    /// Points this outcome is worth
    pub fn score_delta(self) -> u32 {
        match self {
            Outcome::Hit => 1,
            Outcome::Miss => 0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Hit => write!(f, "hit"),
            Outcome::Miss => write!(f, "miss"),
        }
    }
}

/// Horizontal distance between the landing point and the target
pub fn landing_distance(trajectory: &Trajectory, target_x: f64) -> f64 {
    (trajectory.landing_point().x - target_x).abs()
}

/// Decide hit or miss; pure, the caller applies any score change
pub fn evaluate(trajectory: &Trajectory, target_x: f64, hit_radius: f64) -> Outcome {
    if landing_distance(trajectory, target_x) <= hit_radius {
        Outcome::Hit
    } else {
        Outcome::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HIT_RADIUS_M;
    use crate::params::SimulationParameters;
    use crate::trajectory::integrate;

    fn shot(speed: f64, angle: f64, wind: f64) -> Trajectory {
        integrate(&SimulationParameters::new(speed, angle, wind, 1.0).unwrap())
    }

    #[test]
    fn test_hit_within_radius() {
        // Lands at ~39.04 m
        let trajectory = shot(20.0, 45.0, 0.0);
        assert_eq!(evaluate(&trajectory, 40.0, HIT_RADIUS_M), Outcome::Hit);
        assert_eq!(evaluate(&trajectory, 42.0, HIT_RADIUS_M), Outcome::Hit);
        assert_eq!(evaluate(&trajectory, 43.0, HIT_RADIUS_M), Outcome::Miss);
        assert_eq!(evaluate(&trajectory, 36.0, HIT_RADIUS_M), Outcome::Miss);
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let trajectory = shot(20.0, 45.0, 0.0);
        let distance = landing_distance(&trajectory, 45.0);
        assert_eq!(evaluate(&trajectory, 45.0, distance), Outcome::Hit);
        assert_eq!(evaluate(&trajectory, 45.0, distance - 1e-9), Outcome::Miss);
    }

    #[test]
    fn test_long_shot_misses() {
        // Lands at ~231.8 m, far past the target range
        let trajectory = shot(50.0, 45.0, 0.0);
        assert!((trajectory.landing_point().x - 231.84123119510272).abs() < 1e-6);
        assert_eq!(evaluate(&trajectory, 40.0, HIT_RADIUS_M), Outcome::Miss);
    }

    #[test]
    fn test_degenerate_launch_misses_real_targets() {
        let trajectory = shot(0.0, 0.0, 0.0);
        for target in 30..=70 {
            assert_eq!(evaluate(&trajectory, target as f64, HIT_RADIUS_M), Outcome::Miss);
        }
        assert_eq!(evaluate(&trajectory, 0.0, HIT_RADIUS_M), Outcome::Hit);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let trajectory = shot(22.0, 45.0, 0.0);
        let snapshot = trajectory.clone();
        let first = evaluate(&trajectory, 47.0, HIT_RADIUS_M);
        let second = evaluate(&trajectory, 47.0, HIT_RADIUS_M);
        assert_eq!(first, second);
        assert_eq!(trajectory, snapshot);
    }

    #[test]
    fn test_score_delta() {
        assert_eq!(Outcome::Hit.score_delta(), 1);
        assert_eq!(Outcome::Miss.score_delta(), 0);
        assert_eq!(Outcome::Hit.to_string(), "hit");
    }
}
