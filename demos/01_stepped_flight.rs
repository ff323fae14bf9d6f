/// Stepped Flight Example
///
/// Pulls a launch one sample at a time, the way an animation clock would,
/// and only decides the outcome once the terminal sample arrives.

use projectile_game::{FixedPlacer, GameConfig, GameSession, SimulationParameters, Target};

fn main() {
    println!("=== Stepped Flight Example ===\n");

    let config = GameConfig::default();
    let mut session = GameSession::new(FixedPlacer(Target::at(40.0)), &config);

    let params = SimulationParameters::new(20.0, 45.0, 0.0, 1.0).expect("valid parameters");
    let mut launch = session.begin(params);

    println!("  Step |  Time (s) |   X (m)  |   Y (m)");
    println!("  -----|-----------|----------|---------");
    while let Some(sample) = launch.step() {
        if sample.step % 25 == 0 || sample.is_terminal() {
            println!("  {:4} | {:9.2} | {:8.2} | {:8.2}", sample.step, sample.time, sample.x(), sample.y());
        }
        if sample.is_terminal() {
            break;
        }
    }

    let report = session.conclude(launch);
    println!();
    println!("Outcome: {} (landed at {:.2} m, target {} m)", report.outcome, report.landing_x, report.target.x);
    println!("Score: {}", report.score.value());
}
