//! Game session: target placement, launch lifecycle and score keeping.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::InputError;
use crate::outcome::{evaluate, landing_distance, Outcome};
use crate::params::{LaunchForm, SimulationParameters};
use crate::target::{Target, TargetPlacer};
use crate::trajectory::{integrate, Flight, Trajectory, TrajectorySample};

/// Hits scored in a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(u32);

impl Score {
    pub fn value(self) -> u32 {
        self.0
    }

    /// Score after `outcome`; never decreases
    pub fn record(self, outcome: Outcome) -> Score {
        Score(self.0.saturating_add(outcome.score_delta()))
    }
}

/// A launch in flight
///
/// Samples are pulled one at a time; the outcome is only decided once the
/// launch is handed back to `GameSession::conclude`.
#[derive(Debug, Clone)]
pub struct Launch {
    params: SimulationParameters,
    target: Target,
    flight: Flight,
    samples: Vec<TrajectorySample>,
}

impl Launch {
    fn new(params: SimulationParameters, target: Target) -> Self {
        Self {
            flight: Flight::new(&params),
            params,
            target,
            samples: Vec::new(),
        }
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Samples produced so far
    pub fn trail(&self) -> &[TrajectorySample] {
        &self.samples
    }

    /// Advance one sample
    pub fn step(&mut self) -> Option<TrajectorySample> {
        let sample = self.flight.next()?;
        self.samples.push(sample);
        Some(sample)
    }

    pub fn is_finished(&self) -> bool {
        self.flight.is_finished()
    }

    /// Full flight from a fresh integration, without disturbing this launch
    pub fn preview(&self) -> Trajectory {
        integrate(&self.params)
    }

    fn into_trajectory(mut self) -> (SimulationParameters, Target, Trajectory) {
        while self.step().is_some() {}
        (self.params, self.target, Trajectory::from_samples(self.samples))
    }
}

impl Iterator for Launch {
    type Item = TrajectorySample;

    fn next(&mut self) -> Option<TrajectorySample> {
        self.step()
    }
}

/// Everything known about a finished launch
#[derive(Debug, Clone)]
pub struct LaunchReport {
    pub params: SimulationParameters,
    pub target: Target,
    pub trajectory: Trajectory,
    pub outcome: Outcome,
    pub landing_x: f64,
    pub miss_distance: f64,
    pub score: Score,
}

impl LaunchReport {
    /// Kinetic energy at the final sample (J)
    pub fn impact_energy(&self) -> f64 {
        let speed = self.trajectory.impact_speed();
        0.5 * self.params.mass * speed * speed
    }
}

/// One player's run of launches
#[derive(Debug)]
pub struct GameSession<P: TargetPlacer> {
    placer: P,
    hit_radius: f64,
    score: Score,
    launches: u32,
}

impl<P: TargetPlacer> GameSession<P> {
    pub fn new(placer: P, config: &GameConfig) -> Self {
        Self {
            placer,
            hit_radius: config.hit_radius,
            score: Score::default(),
            launches: 0,
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn launches(&self) -> u32 {
        self.launches
    }

    pub fn hit_radius(&self) -> f64 {
        self.hit_radius
    }

    /// Place a new target and start the flight
    pub fn begin(&mut self, params: SimulationParameters) -> Launch {
        let target = self.placer.place();
        debug!(
            target_x = target.x,
            speed = params.speed,
            angle = params.angle_deg,
            wind = params.wind,
            "launch started"
        );
        Launch::new(params, target)
    }

    /// Finish the flight, decide the outcome and apply it to the score
    pub fn conclude(&mut self, launch: Launch) -> LaunchReport {
        let (params, target, trajectory) = launch.into_trajectory();
        let outcome = evaluate(&trajectory, target.x, self.hit_radius);
        let miss_distance = landing_distance(&trajectory, target.x);
        let landing_x = trajectory.landing_point().x;

        self.launches += 1;
        self.score = self.score.record(outcome);
        info!(
            %outcome,
            landing_x,
            target_x = target.x,
            score = self.score.value(),
            "launch finished"
        );

        LaunchReport {
            params,
            target,
            trajectory,
            outcome,
            landing_x,
            miss_distance,
            score: self.score,
        }
    }

    pub fn launch(&mut self, params: SimulationParameters) -> LaunchReport {
        let launch = self.begin(params);
        self.conclude(launch)
    }

    /// Validate the form first; a bad form draws no target and scores nothing
    pub fn launch_form(&mut self, form: &LaunchForm) -> Result<LaunchReport, InputError> {
        let params = form.parse()?;
        Ok(self.launch(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{FixedPlacer, RandomPlacer, TargetRange};

    fn fixed_session(target_x: f64) -> GameSession<FixedPlacer> {
        GameSession::new(FixedPlacer(Target::at(target_x)), &GameConfig::default())
    }

    fn hit_params() -> SimulationParameters {
        // Lands at ~39.04 m
        SimulationParameters::new(20.0, 45.0, 0.0, 1.0).unwrap()
    }

    #[test]
    fn test_score_record() {
        let score = Score::default();
        assert_eq!(score.record(Outcome::Hit).value(), 1);
        assert_eq!(score.record(Outcome::Miss).value(), 0);
        assert_eq!(Score(u32::MAX).record(Outcome::Hit).value(), u32::MAX);
    }

    #[test]
    fn test_three_hits_score_three() {
        let mut session = fixed_session(40.0);
        for expected in 1..=3 {
            let report = session.launch(hit_params());
            assert_eq!(report.outcome, Outcome::Hit);
            assert_eq!(report.score.value(), expected);
        }
        assert_eq!(session.score().value(), 3);
        assert_eq!(session.launches(), 3);
    }

    #[test]
    fn test_miss_leaves_score() {
        let mut session = fixed_session(40.0);
        session.launch(hit_params());
        let report = session.launch(SimulationParameters::new(50.0, 45.0, 0.0, 1.0).unwrap());
        assert_eq!(report.outcome, Outcome::Miss);
        assert_eq!(session.score().value(), 1);
    }

    #[test]
    fn test_input_error_leaves_score() {
        let mut session = fixed_session(40.0);
        session.launch(hit_params());

        let form = LaunchForm { speed: "fast", angle: "45", mass: "1", wind: "0" };
        let err = session.launch_form(&form).unwrap_err();
        assert_eq!(err.field(), "speed");
        assert_eq!(session.score().value(), 1);
        assert_eq!(session.launches(), 1);

        let form = LaunchForm { speed: "20", angle: "45", mass: "1", wind: "0" };
        let report = session.launch_form(&form).unwrap();
        assert_eq!(report.outcome, Outcome::Hit);
        assert_eq!(session.score().value(), 2);
    }

    #[test]
    fn test_stepped_launch_matches_direct_launch() {
        let mut stepped = fixed_session(40.0);
        let mut launch = stepped.begin(hit_params());

        let mut pulled = 0;
        while let Some(sample) = launch.step() {
            pulled += 1;
            if sample.is_terminal() {
                break;
            }
        }
        assert!(launch.is_finished());
        assert_eq!(launch.trail().len(), pulled);
        let stepped_report = stepped.conclude(launch);

        let direct_report = fixed_session(40.0).launch(hit_params());
        assert_eq!(stepped_report.trajectory, direct_report.trajectory);
        assert_eq!(stepped_report.outcome, direct_report.outcome);
    }

    #[test]
    fn test_conclude_drains_partial_launch() {
        let mut session = fixed_session(40.0);
        let mut launch = session.begin(hit_params());
        launch.by_ref().take(10).for_each(drop);
        assert_eq!(launch.preview().len(), 286);

        let report = session.conclude(launch);
        assert_eq!(report.trajectory.len(), 286);
        assert_eq!(report.outcome, Outcome::Hit);
        assert!((report.landing_x - 39.04029560406422).abs() < 1e-6);
        assert!(report.miss_distance < 1.0);
    }

    #[test]
    fn test_target_redrawn_every_launch() {
        let placer = RandomPlacer::seeded(3, TargetRange::default());
        let mut session = GameSession::new(placer, &GameConfig::default());
        let targets: Vec<f64> = (0..10).map(|_| session.launch(hit_params()).target.x).collect();
        assert!(targets.iter().all(|x| (30.0..=70.0).contains(x)));
        assert!(targets.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_impact_energy_uses_mass() {
        let mut session = fixed_session(40.0);
        let light = session.launch(SimulationParameters::new(20.0, 45.0, 0.0, 1.0).unwrap());
        let heavy = session.launch(SimulationParameters::new(20.0, 45.0, 0.0, 2.0).unwrap());
        assert_eq!(light.trajectory, heavy.trajectory);
        assert!((heavy.impact_energy() - 2.0 * light.impact_energy()).abs() < 1e-9);
    }
}
