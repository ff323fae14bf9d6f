//! Terminal plot of a flight: trail, projectile and target on a character grid.

use crate::constants::{MIN_PLOT_X_M, PLOT_MARGIN_M, PLOT_TICK_SPACING_M};
use crate::outcome::Outcome;
use crate::session::LaunchReport;
use crate::target::Target;
use crate::trajectory::{Trajectory, TrajectorySample};

const TITLE: &str = "Projectile Motion Mini-Game";
const LEFT_MARGIN: usize = 8;

const TRAIL: char = '.';
const PROJECTILE: char = 'o';
const TARGET: char = 'X';

/// Visible extent of the plot, starting at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub x_max: f64,
    pub y_max: f64,
}

impl PlotBounds {
    /// Extents cover the finite samples only; overflowed coordinates stay off the plot
    pub fn for_trajectory(trajectory: &Trajectory) -> Self {
        let samples = trajectory.samples();
        let max_x = finite_max(samples.iter().map(|s| s.x()));
        let max_y = finite_max(samples.iter().map(|s| s.y()));
        Self {
            x_max: clamp_extent(max_x + PLOT_MARGIN_M).max(MIN_PLOT_X_M),
            y_max: clamp_extent(max_y + PLOT_MARGIN_M),
        }
    }
}

fn finite_max(values: impl Iterator<Item = f64>) -> f64 {
    values.filter(|v| v.is_finite()).fold(0.0, f64::max)
}

fn clamp_extent(extent: f64) -> f64 {
    if extent.is_finite() {
        extent
    } else {
        f64::MAX
    }
}

/// Character grid for one frame
#[derive(Debug, Clone)]
pub struct Plot {
    bounds: PlotBounds,
    width: usize,
    height: usize,
}

impl Plot {
    pub fn new(bounds: PlotBounds, width: usize, height: usize) -> Self {
        Self {
            bounds,
            width: width.max(2),
            height: height.max(2),
        }
    }

    fn column(&self, x: f64) -> Option<usize> {
        if !(0.0..=self.bounds.x_max).contains(&x) {
            return None;
        }
        Some((x / self.bounds.x_max * (self.width - 1) as f64).round() as usize)
    }

    fn row(&self, y: f64) -> Option<usize> {
        if !(0.0..=self.bounds.y_max).contains(&y) {
            return None;
        }
        let from_ground = (y / self.bounds.y_max * (self.height - 1) as f64).round() as usize;
        Some(self.height - 1 - from_ground)
    }

    fn put(&self, grid: &mut [Vec<char>], x: f64, y: f64, mark: char) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        if let (Some(col), Some(row)) = (self.column(x), self.row(y)) {
            grid[row][col] = mark;
        }
    }

    /// Tick spacing in meters, widened until ticks are at least 4 columns apart
    fn tick_spacing(&self) -> f64 {
        let columns_per_meter = (self.width - 1) as f64 / self.bounds.x_max;
        let mut spacing = PLOT_TICK_SPACING_M;
        while spacing.is_finite() && spacing * columns_per_meter < 4.0 {
            spacing *= 2.0;
        }
        spacing
    }

    /// Draw the trail up to its last sample, which is shown as the projectile
    pub fn render(&self, trail: &[TrajectorySample], target: &Target) -> String {
        let mut grid = vec![vec![' '; self.width]; self.height];

        for sample in trail {
            self.put(&mut grid, sample.x(), sample.y(), TRAIL);
        }
        self.put(&mut grid, target.x, target.y, TARGET);
        if let Some(current) = trail.last() {
            self.put(&mut grid, current.x(), current.y(), PROJECTILE);
        }

        let mut out = String::new();
        out.push_str(&format!("{:>width$}{}\n", "", TITLE, width = LEFT_MARGIN));

        for (i, row) in grid.iter().enumerate() {
            let label = if i == 0 {
                format!("{:.1}", self.bounds.y_max)
            } else if i == self.height - 1 {
                "0".to_string()
            } else {
                String::new()
            };
            let line: String = row.iter().collect();
            out.push_str(&format!("{:>6} |{}\n", label, line.trim_end()));
        }

        let mut axis = vec!['-'; self.width];
        let spacing = self.tick_spacing();
        // Ticks are at least 4 columns apart, so one per column is an upper bound
        for k in 0..self.width {
            let tick = k as f64 * spacing;
            if !tick.is_finite() || tick > self.bounds.x_max {
                break;
            }
            if let Some(col) = self.column(tick) {
                axis[col] = '+';
            }
        }
        out.push_str(&format!("{:>6} +{}\n", "", axis.iter().collect::<String>()));

        let right = format!("{:.0}", self.bounds.x_max);
        let gap = self.width.saturating_sub(1 + right.len());
        out.push_str(&format!("{:>6}  0{}{}\n", "", " ".repeat(gap), right));
        out.push_str(&format!(
            "{:>6}  Distance (m), ticks every {} m; Height (m) on the left\n",
            "", spacing
        ));
        out
    }
}

/// Plot sized to a finished trajectory
pub fn render_frame(
    trail: &[TrajectorySample],
    trajectory: &Trajectory,
    target: &Target,
    width: usize,
    height: usize,
) -> String {
    Plot::new(PlotBounds::for_trajectory(trajectory), width, height).render(trail, target)
}

/// Message announcing a launch result
pub fn outcome_message(report: &LaunchReport) -> String {
    match report.outcome {
        Outcome::Hit => "Hit! You scored!".to_string(),
        Outcome::Miss => format!("Miss! Target was at {} m", report.target.x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::params::SimulationParameters;
    use crate::session::GameSession;
    use crate::target::FixedPlacer;
    use crate::trajectory::integrate;

    fn trajectory(speed: f64, angle: f64) -> Trajectory {
        integrate(&SimulationParameters::new(speed, angle, 0.0, 1.0).unwrap())
    }

    fn grid(frame: &str) -> String {
        frame
            .lines()
            .filter_map(|l| l.split_once(" |").map(|(_, cells)| cells))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_bounds_short_flight_uses_minimum_width() {
        let bounds = PlotBounds::for_trajectory(&trajectory(20.0, 45.0));
        assert_eq!(bounds.x_max, 80.0);
        assert!((bounds.y_max - 19.9402813418725).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_long_flight_adds_margin() {
        let t = trajectory(50.0, 45.0);
        let bounds = PlotBounds::for_trajectory(&t);
        assert!((bounds.x_max - (t.max_distance() + 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_frame_marks() {
        let t = trajectory(20.0, 45.0);
        let target = Target::at(60.0);
        let frame = render_frame(&t.samples()[..100], &t, &target, 72, 20);

        assert!(frame.starts_with(&format!("{:>8}{}", "", TITLE)));
        let cells = grid(&frame);
        assert_eq!(cells.matches(PROJECTILE).count(), 1);
        assert_eq!(cells.matches(TARGET).count(), 1);
        assert!(cells.contains(TRAIL));
        assert!(frame.contains('+'));
    }

    #[test]
    fn test_ground_row_holds_target() {
        let t = trajectory(20.0, 45.0);
        let frame = render_frame(&t.samples()[..1], &t, &Target::at(40.0), 72, 20);
        let ground = frame.lines().find(|l| l.trim_start().starts_with("0 |")).unwrap();
        assert!(ground.contains(TARGET));
        // Projectile sits at the origin on the ground row
        assert!(ground.contains(PROJECTILE));
    }

    #[test]
    fn test_below_ground_sample_not_drawn() {
        let t = trajectory(0.0, 0.0);
        let plot = Plot::new(PlotBounds::for_trajectory(&t), 40, 10);
        let frame = plot.render(&t.samples()[1..], &Target::at(200.0));
        let cells = grid(&frame);
        assert_eq!(cells.matches(PROJECTILE).count(), 0);
        assert_eq!(cells.matches(TARGET).count(), 0);
    }

    #[test]
    fn test_tick_spacing_widens_for_long_plots() {
        let narrow = Plot::new(PlotBounds { x_max: 80.0, y_max: 10.0 }, 72, 10);
        assert_eq!(narrow.tick_spacing(), 5.0);
        let wide = Plot::new(PlotBounds { x_max: 800.0, y_max: 10.0 }, 72, 10);
        assert!(wide.tick_spacing() > 5.0);
    }

    #[test]
    fn test_overflowing_flight_renders() {
        let t = trajectory(1e308, 45.0);
        assert!(!t.max_distance().is_finite());

        let bounds = PlotBounds::for_trajectory(&t);
        assert!(bounds.x_max.is_finite());
        assert!(bounds.y_max.is_finite());

        let frame = render_frame(&t.samples()[..2], &t, &Target::at(40.0), 72, 20);
        assert!(frame.starts_with(&format!("{:>8}{}", "", TITLE)));
        assert!(frame.contains("ticks every"));

        // Every sample, overflowed ones included, is drawn without hanging
        let frame = render_frame(t.samples(), &t, &Target::at(40.0), 72, 20);
        assert_eq!(grid(&frame).lines().count(), 20);
    }

    #[test]
    fn test_infinite_bounds_terminate() {
        let plot = Plot::new(PlotBounds { x_max: f64::INFINITY, y_max: f64::INFINITY }, 72, 10);
        assert!(!plot.tick_spacing().is_finite());
        let frame = plot.render(&[], &Target::at(40.0));
        assert!(frame.contains(TITLE));
    }

    #[test]
    fn test_outcome_messages() {
        let mut session = GameSession::new(FixedPlacer(Target::at(40.0)), &GameConfig::default());
        let hit = session.launch(SimulationParameters::new(20.0, 45.0, 0.0, 1.0).unwrap());
        assert_eq!(outcome_message(&hit), "Hit! You scored!");
        let miss = session.launch(SimulationParameters::new(50.0, 45.0, 0.0, 1.0).unwrap());
        assert_eq!(outcome_message(&miss), "Miss! Target was at 40 m");
    }
}
