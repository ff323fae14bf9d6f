use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::thread;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use projectile_game::constants::{
    DRAG_PIXELS_PER_MPS, GRAVITY_MPS2, LINEAR_DRAG_PER_S, MAX_FLIGHT_TIME_S, TIME_STEP_S,
};
use projectile_game::{
    outcome_message, parse_field, DragGesture, FixedPlacer, GameConfig, GameSession, InputError,
    Launch, LaunchForm, LaunchReport, Plot, PlotBounds, RandomPlacer, SimulationParameters,
    Target, TargetPlacer,
};

#[derive(Parser)]
#[command(name = "projectile")]
#[command(author = "Projectile Game Team")]
#[command(version = "0.1.0")]
#[command(about = "Projectile launch mini-game: hit the target, rack up the score", long_about = None)]
struct Cli {
    /// Game config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for target placement
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch a single projectile
    Launch {
        /// Initial speed (m/s)
        #[arg(short = 'v', long, allow_hyphen_values = true)]
        speed: String,

        /// Launch angle (degrees)
        #[arg(short = 'a', long, allow_hyphen_values = true)]
        angle: String,

        /// Mass (kg)
        #[arg(short = 'm', long, default_value = "1.0", allow_hyphen_values = true)]
        mass: String,

        /// Wind added to horizontal velocity (m/s)
        #[arg(short = 'w', long, default_value = "0.0", allow_hyphen_values = true)]
        wind: String,

        #[command(flatten)]
        shot: ShotOptions,
    },

    /// Launch with a drag gesture on the launch canvas
    Drag {
        /// Drag start as "x,y" in canvas pixels (y grows downward)
        #[arg(long, allow_hyphen_values = true)]
        from: CanvasPoint,

        /// Drag end as "x,y" in canvas pixels
        #[arg(long, allow_hyphen_values = true)]
        to: CanvasPoint,

        /// Mass (kg)
        #[arg(short = 'm', long, default_value = "1.0", allow_hyphen_values = true)]
        mass: String,

        /// Wind added to horizontal velocity (m/s)
        #[arg(short = 'w', long, default_value = "0.0", allow_hyphen_values = true)]
        wind: String,

        #[command(flatten)]
        shot: ShotOptions,
    },

    /// Play interactively, reading launches from stdin
    Play {
        /// Pin the target at this distance instead of drawing one (m)
        #[arg(long, allow_hyphen_values = true)]
        target: Option<String>,

        /// Skip the flight animation
        #[arg(long)]
        no_animate: bool,
    },

    /// Display game information
    Info,
}

#[derive(Args)]
struct ShotOptions {
    /// Pin the target at this distance instead of drawing one (m)
    #[arg(long, allow_hyphen_values = true)]
    target: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Full output (show all trajectory points)
    #[arg(long)]
    full: bool,

    /// Animate the flight before reporting
    #[arg(long)]
    animate: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Clone, Copy)]
struct CanvasPoint(f64, f64);

impl FromStr for CanvasPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
        let x = parse_field("x", x).map_err(|e| e.to_string())?;
        let y = parse_field("y", y).map_err(|e| e.to_string())?;
        Ok(CanvasPoint(x, y))
    }
}

#[derive(Debug, Serialize)]
struct TrajectoryPoint {
    time: f64,
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize)]
struct LaunchSummary {
    outcome: String,
    message: String,
    speed: f64,
    angle: f64,
    wind: f64,
    mass: f64,
    target_x: f64,
    landing_x: f64,
    miss_distance: f64,
    landed: bool,
    max_height: f64,
    time_of_flight: f64,
    impact_speed: f64,
    impact_energy: f64,
    score: u32,
    trajectory: Vec<TrajectoryPoint>,
}

type Session = GameSession<Box<dyn TargetPlacer>>;

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match cli.command {
        Commands::Launch { speed, angle, mass, wind, shot } => {
            let form = LaunchForm {
                speed: &speed,
                angle: &angle,
                mass: &mass,
                wind: &wind,
            };
            let params = form.parse().map_err(reject)?;
            run_shot(params, &shot, &config)?;
        },

        Commands::Drag { from, to, mass, wind, shot } => {
            let params = drag_params(from, to, &mass, &wind).map_err(reject)?;
            run_shot(params, &shot, &config)?;
        },

        Commands::Play { target, no_animate } => {
            let pinned = pinned_target(target.as_deref()).map_err(reject)?;
            let mut session = Session::new(placer(&config, pinned), &config);
            play(&mut session, &config, !no_animate)?;
        },

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║     PROJECTILE MOTION MINI-GAME        ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Gravity:           {:>8.2} m/s²       ║", GRAVITY_MPS2);
            println!("║ Linear drag:       {:>8.2} 1/s        ║", LINEAR_DRAG_PER_S);
            println!("║ Time step:         {:>8.3} s          ║", TIME_STEP_S);
            println!("║ Max flight time:   {:>8.1} s          ║", MAX_FLIGHT_TIME_S);
            println!("╠════════════════════════════════════════╣");
            println!("║ Target range:      {:>4} - {:<4} m      ║", config.target_min_x, config.target_max_x);
            println!("║ Hit radius:        {:>8.2} m          ║", config.hit_radius);
            println!("║ Drag scale:        {:>8.1} px per m/s ║", DRAG_PIXELS_PER_MPS);
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn reject(err: InputError) -> anyhow::Error {
    warn!(field = err.field(), "rejected launch input");
    anyhow!("Input error: {err}")
}

fn pinned_target(raw: Option<&str>) -> Result<Option<f64>, InputError> {
    raw.map(|raw| parse_field("target", raw)).transpose()
}

fn placer(config: &GameConfig, pinned: Option<f64>) -> Box<dyn TargetPlacer> {
    match (pinned, config.seed) {
        (Some(x), _) => Box::new(FixedPlacer(Target::at(x))),
        (None, Some(seed)) => Box::new(RandomPlacer::seeded(seed, config.target_range())),
        (None, None) => Box::new(RandomPlacer::from_entropy(config.target_range())),
    }
}

fn drag_params(
    from: CanvasPoint,
    to: CanvasPoint,
    mass: &str,
    wind: &str,
) -> Result<SimulationParameters, InputError> {
    let gesture = DragGesture::new((from.0, from.1), (to.0, to.1));
    let mass = parse_field("mass", mass)?;
    let wind = parse_field("wind", wind)?;
    SimulationParameters::from_drag(gesture, wind, mass)
}

fn run_shot(params: SimulationParameters, shot: &ShotOptions, config: &GameConfig) -> Result<()> {
    let pinned = pinned_target(shot.target.as_deref()).map_err(reject)?;
    let mut session = Session::new(placer(config, pinned), config);
    let mut launch = session.begin(params);
    if shot.animate {
        animate(&mut launch, config)?;
    }
    let report = session.conclude(launch);
    display_report(&report, shot.output, shot.full)
}

/// Play the flight frame by frame; stops on the terminal sample
fn animate(launch: &mut Launch, config: &GameConfig) -> Result<()> {
    let plot = Plot::new(
        PlotBounds::for_trajectory(&launch.preview()),
        config.plot_width,
        config.plot_height,
    );
    let target = launch.target();
    let delay = Duration::from_millis(config.frame_interval_ms);
    let mut stdout = io::stdout().lock();

    while let Some(sample) = launch.step() {
        write!(stdout, "\x1b[2J\x1b[H{}", plot.render(launch.trail(), &target))?;
        stdout.flush()?;
        if sample.is_terminal() {
            break;
        }
        thread::sleep(delay);
    }
    Ok(())
}

fn play(session: &mut Session, config: &GameConfig, animated: bool) -> Result<()> {
    println!("Projectile Motion Mini-Game");
    print_play_help();
    prompt()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let params = match tokens.as_slice() {
            [] => None,
            ["quit"] | ["exit"] | ["q"] => break,
            ["help"] => {
                print_play_help();
                None
            },
            ["score"] => {
                println!("Score: {}", session.score().value());
                None
            },
            ["drag", rest @ ..] => report_input(drag_from_tokens(rest)),
            fields if fields.len() > 4 => {
                println!("Expected at most 4 values: <speed> <angle> [mass] [wind]");
                None
            },
            fields => report_input(form_from_tokens(fields).parse()),
        };

        if let Some(params) = params {
            let mut launch = session.begin(params);
            if animated {
                animate(&mut launch, config)?;
            }
            let report = session.conclude(launch);
            println!(
                "{} (landed at {:.2} m, score {})",
                outcome_message(&report),
                report.landing_x,
                report.score.value()
            );
        }
        prompt()?;
    }

    println!();
    println!("Final score: {}", session.score().value());
    Ok(())
}

fn form_from_tokens<'a>(fields: &[&'a str]) -> LaunchForm<'a> {
    let get = |i: usize, default: &'a str| fields.get(i).copied().unwrap_or(default);
    LaunchForm {
        speed: get(0, ""),
        angle: get(1, ""),
        mass: get(2, "1"),
        wind: get(3, "0"),
    }
}

fn drag_from_tokens(fields: &[&str]) -> Result<SimulationParameters, InputError> {
    let get = |i: usize| fields.get(i).copied().unwrap_or("");
    let start = (parse_field("start x", get(0))?, parse_field("start y", get(1))?);
    let end = (parse_field("end x", get(2))?, parse_field("end y", get(3))?);
    let mass = parse_field("mass", fields.get(4).copied().unwrap_or("1"))?;
    let wind = parse_field("wind", fields.get(5).copied().unwrap_or("0"))?;
    SimulationParameters::from_drag(DragGesture::new(start, end), wind, mass)
}

fn report_input(result: Result<SimulationParameters, InputError>) -> Option<SimulationParameters> {
    match result {
        Ok(params) => Some(params),
        Err(err) => {
            warn!(field = err.field(), "rejected launch input");
            println!("Input error: {err}. Please enter valid numbers!");
            None
        }
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn print_play_help() {
    println!("Commands:");
    println!("  <speed> <angle> [mass] [wind]   launch (m/s, degrees, kg, m/s)");
    println!("  drag <x0> <y0> <x1> <y1>         launch by dragging on the canvas");
    println!("  score                            show the score");
    println!("  help                             show this help");
    println!("  quit                             leave the game");
}

fn summarize(report: &LaunchReport) -> LaunchSummary {
    let trajectory = &report.trajectory;
    LaunchSummary {
        outcome: report.outcome.to_string(),
        message: outcome_message(report),
        speed: report.params.speed,
        angle: report.params.angle_deg,
        wind: report.params.wind,
        mass: report.params.mass,
        target_x: report.target.x,
        landing_x: report.landing_x,
        miss_distance: report.miss_distance,
        landed: trajectory.landed(),
        max_height: trajectory.max_height(),
        time_of_flight: trajectory.time_of_flight(),
        impact_speed: trajectory.impact_speed(),
        impact_energy: report.impact_energy(),
        score: report.score.value(),
        trajectory: trajectory
            .samples()
            .iter()
            .map(|s| TrajectoryPoint { time: s.time, x: s.x(), y: s.y() })
            .collect(),
    }
}

fn display_report(report: &LaunchReport, format: OutputFormat, full: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summarize(report))?);
        },

        OutputFormat::Csv => {
            println!("time,x,y,vx,vy");
            for s in report.trajectory.samples() {
                println!("{:.2},{:.4},{:.4},{:.4},{:.4}",
                    s.time, s.x(), s.y(), s.velocity.x, s.velocity.y);
            }
        },

        OutputFormat::Table => {
            let trajectory = &report.trajectory;
            let verdict = if report.outcome.is_hit() { "HIT" } else { "MISS" };
            println!("╔════════════════════════════════════════╗");
            println!("║           LAUNCH RESULTS               ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Speed:             {:>8.2} m/s        ║", report.params.speed);
            println!("║ Angle:             {:>8.2} deg        ║", report.params.angle_deg);
            println!("║ Wind:              {:>8.2} m/s        ║", report.params.wind);
            println!("║ Mass:              {:>8.2} kg         ║", report.params.mass);
            println!("╠════════════════════════════════════════╣");
            println!("║ Target:            {:>8.2} m          ║", report.target.x);
            println!("║ Landing:           {:>8.2} m          ║", report.landing_x);
            println!("║ Miss Distance:     {:>8.2} m          ║", report.miss_distance);
            println!("║ Max Height:        {:>8.2} m          ║", trajectory.max_height());
            println!("║ Time of Flight:    {:>8.3} s          ║", trajectory.time_of_flight());
            println!("║ Impact Energy:     {:>8.2} J          ║", report.impact_energy());
            println!("╠════════════════════════════════════════╣");
            println!("║ Outcome:           {:>8}            ║", verdict);
            println!("║ Score:             {:>8}            ║", report.score.value());
            println!("╚════════════════════════════════════════╝");
            if !trajectory.landed() {
                println!("Flight hit the {:.0} s limit before landing.", MAX_FLIGHT_TIME_S);
            }
            println!("{}", outcome_message(report));

            let samples = trajectory.samples();
            let step = if full { 1 } else { (samples.len() / 10).max(1) };
            if full {
                println!("\nFull Trajectory Points:");
            } else {
                println!("\nTrajectory Points (every {} steps):", step);
            }
            println!("┌──────────┬──────────┬──────────┐");
            println!("│ Time (s) │  X (m)   │  Y (m)   │");
            println!("├──────────┼──────────┼──────────┤");
            for (i, s) in samples.iter().enumerate() {
                if i % step == 0 || i == samples.len() - 1 {
                    println!("│ {:>8.2} │ {:>8.2} │ {:>8.2} │", s.time, s.x(), s.y());
                }
            }
            println!("└──────────┴──────────┴──────────┘");
        },
    }

    Ok(())
}
