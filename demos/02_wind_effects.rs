/// Wind Effects Example
///
/// Same launch under different wind speeds, against the hit radius around a
/// 40 m target.

use projectile_game::constants::HIT_RADIUS_M;
use projectile_game::{evaluate, integrate, SimulationParameters};

fn main() {
    println!("=== Wind Effects Example ===\n");

    let target_x = 40.0;
    println!("  Wind (m/s) | Landing (m) | Outcome");
    println!("  -----------|-------------|--------");
    for wind in [-6.0, -3.0, 0.0, 3.0, 6.0] {
        let params = SimulationParameters::new(20.0, 45.0, wind, 1.0).expect("valid parameters");
        let trajectory = integrate(&params);
        let outcome = evaluate(&trajectory, target_x, HIT_RADIUS_M);
        println!("  {:10.1} | {:11.2} | {}", wind, trajectory.landing_point().x, outcome);
    }
}
