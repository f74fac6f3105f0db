use std::hint::black_box;
use std::io;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use indoc::formatdoc;
use viewport_wm::drivers::pointer::PointerRoute;
use viewport_wm::engine::InteractionEngine;
use viewport_wm::geometry::{GeometryPolicy, Position, Viewport};
use viewport_wm::store::{MemoryStore, WindowSpec, WindowStore};
use viewport_wm::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Gesture {
    Drag,
    Resize,
    Mixed,
}

#[derive(Parser, Debug)]
#[command(
    name = "gesture-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replays synthetic pointer gestures and reports per-move commit latency"
)]
struct BenchCli {
    /// Windows open on the desktop.
    #[arg(short = 'w', long = "windows", default_value_t = 64)]
    windows: usize,

    /// Pointer moves per gesture.
    #[arg(short = 'm', long = "moves", default_value_t = 2_000)]
    moves: usize,

    /// Gestures replayed, each on the next window in turn.
    #[arg(short = 'g', long = "gestures", default_value_t = 32)]
    gestures: usize,

    #[arg(long, value_enum, default_value_t = Gesture::Mixed)]
    gesture: Gesture,
}

struct BenchConfig {
    windows: usize,
    moves: usize,
    gestures: usize,
    gesture: Gesture,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=10_000).contains(&cli.windows) {
            return Err("windows must be between 1 and 10000".to_string());
        }
        if !(1..=1_000_000).contains(&cli.moves) {
            return Err("moves must be between 1 and 1000000".to_string());
        }
        if cli.gestures == 0 {
            return Err("gestures must be at least 1".to_string());
        }
        Ok(Self {
            windows: cli.windows,
            moves: cli.moves,
            gestures: cli.gestures,
            gesture: cli.gesture,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    let stats = run_benchmark(&config);
    println!("{}", stats.report(&config));
    Ok(())
}

const VIEWPORT: Viewport = Viewport::new(1920, 1080);

fn run_benchmark(config: &BenchConfig) -> BenchStats {
    let mut store = MemoryStore::new(VIEWPORT, GeometryPolicy::default());
    let ids: Vec<WindowId> = (0..config.windows)
        .map(|n| store.open_window(WindowSpec::new(format!("Bench {n}"), "inspector")))
        .collect();
    let mut engine = InteractionEngine::new(PointerRoute::new(), VIEWPORT);
    let mut stats = BenchStats::default();
    let started = Instant::now();

    for gesture in 0..config.gestures {
        let id = ids[gesture % ids.len()];
        let Some(origin) = store.window(id).map(|w| w.position) else {
            continue;
        };
        let resize = match config.gesture {
            Gesture::Drag => false,
            Gesture::Resize => true,
            Gesture::Mixed => gesture % 2 == 1,
        };
        let start = Position::new(origin.x + 10, origin.y + 10);
        if resize {
            engine.start_resize(&mut store, id, start);
        } else {
            engine.start_drag(&mut store, id, start);
        }
        for step in 0..config.moves {
            let pointer = orbit(start, step);
            let t = Instant::now();
            engine.on_pointer_move(&mut store, black_box(pointer));
            stats.record(t.elapsed());
        }
        engine.on_pointer_up();
    }

    stats.total = started.elapsed();
    stats.attaches = engine.surface().attached_count();
    stats.detaches = engine.surface().detached_count();
    stats
}

/// Deterministic pointer path that sweeps well past the viewport edges so
/// clamping is exercised on both sides.
fn orbit(start: Position, step: usize) -> Position {
    let phase = (step % 360) as f64 * std::f64::consts::PI / 180.0;
    let reach = 400.0 + (step % 7) as f64 * 150.0;
    Position::new(
        start.x + (phase.cos() * reach) as i32,
        start.y + (phase.sin() * reach) as i32,
    )
}

#[derive(Default)]
struct BenchStats {
    samples: Vec<Duration>,
    total: Duration,
    attaches: usize,
    detaches: usize,
}

impl BenchStats {
    fn record(&mut self, sample: Duration) {
        self.samples.push(sample);
    }

    fn percentile(sorted: &[Duration], pct: f64) -> Duration {
        if sorted.is_empty() {
            return Duration::ZERO;
        }
        let rank = ((sorted.len() - 1) as f64 * pct).round() as usize;
        sorted[rank.min(sorted.len() - 1)]
    }

    fn mean(samples: &[Duration]) -> Duration {
        let total_nanos: u128 = samples.iter().map(Duration::as_nanos).sum();
        let mean_nanos = total_nanos / samples.len().max(1) as u128;
        Duration::from_nanos(u64::try_from(mean_nanos).unwrap_or(u64::MAX))
    }

    fn report(&self, config: &BenchConfig) -> String {
        let mut sorted = self.samples.clone();
        sorted.sort_unstable();
        let mean = Self::mean(&sorted);
        formatdoc! {"
            gesture-bench: {gestures} {gesture:?} gestures x {per} moves over {windows} windows
              total       {total:?}
              mean/move   {mean:?}
              p50         {p50:?}
              p99         {p99:?}
              max         {max:?}
              listeners   {attaches} attached, {detaches} detached",
            gestures = config.gestures,
            gesture = config.gesture,
            per = config.moves,
            windows = config.windows,
            total = self.total,
            mean = mean,
            p50 = Self::percentile(&sorted, 0.50),
            p99 = Self::percentile(&sorted, 0.99),
            max = sorted.last().copied().unwrap_or_default(),
            attaches = self.attaches,
            detaches = self.detaches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_no_samples_is_zero() {
        assert_eq!(BenchStats::mean(&[]), Duration::ZERO);
    }

    #[test]
    fn mean_averages_in_nanoseconds() {
        let samples = [Duration::from_nanos(10), Duration::from_nanos(20), Duration::from_nanos(40)];
        assert_eq!(BenchStats::mean(&samples), Duration::from_nanos(23));
    }

    #[test]
    fn short_run_reports_every_window() {
        let config = BenchConfig {
            windows: 3,
            moves: 10,
            gestures: 4,
            gesture: Gesture::Mixed,
        };
        let stats = run_benchmark(&config);
        assert_eq!(stats.samples.len(), 40);
        assert_eq!(stats.attaches, 4);
        assert_eq!(stats.detaches, 4);
        assert!(stats.report(&config).contains("over 3 windows"));
    }
}
