//! Application entry point for the grid-walk viewer.
//!
//! This binary parses the command line, sets up logging and eframe/egui,
//! and delegates the animation and rendering to [`Viewer`] from the
//! `viewer` module.

mod canvas;
mod viewer;

use clap::{Parser, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use viewer::Viewer;
use walk_core::config::{Config, RestartPolicy};

/// Randomized spanning walks over square, triangular, hexagon and circular grids.
#[derive(Debug, Parser)]
#[command(name = "leafwalk", version)]
struct Args {
    /// What happens after a walk is exhausted.
    #[arg(long, value_enum, default_value_t = Restart::Delayed)]
    restart: Restart,

    /// Seed for the random source; omitted means seeded from the OS.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Restart {
    /// Pause two seconds; the first grid is always square.
    Delayed,
    /// Start a random grid right away, including the first one.
    Immediate,
}

impl Args {
    fn config(&self) -> Config {
        let mut cfg = Config::default();
        if self.restart == Restart::Immediate {
            cfg.restart = RestartPolicy::Immediate;
        }
        cfg
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Initialize tracing subscriber with environment filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
///
/// An invalid configuration is logged and exits with status 1.
fn main() -> eframe::Result<()> {
    init_tracing();
    let args = Args::parse();
    let cfg = args.config();
    let size = viewer::window_size(&cfg);

    let viewer = match Viewer::new(cfg, args.rng()) {
        Ok(viewer) => viewer,
        Err(e) => {
            error!(error = %e, "failed to start");
            std::process::exit(1);
        }
    };
    info!(restart = ?args.restart, seed = ?args.seed, "starting viewer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(size),
        ..Default::default()
    };

    eframe::run_native(
        "Leafwalk",
        options,
        Box::new(move |_cc| Ok(Box::new(viewer))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_delayed_restart() {
        let args = Args::parse_from(["leafwalk"]);
        assert_eq!(args.restart, Restart::Delayed);
        assert!(matches!(args.config().restart, RestartPolicy::Delayed { .. }));
        assert_eq!(args.seed, None);
    }

    #[test]
    fn immediate_flag_switches_policy() {
        let args = Args::parse_from(["leafwalk", "--restart", "immediate", "--seed", "17"]);
        assert_eq!(args.config().restart, RestartPolicy::Immediate);
        assert_eq!(args.seed, Some(17));
    }
}
