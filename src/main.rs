//! Command-line simulator that replays a counter page script.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use countup::page::{FrameClock, FrameReport, Playback, Script};
use countup::{CountUpError, Options};

/// Replay a counter page script and log every rendered value.
#[derive(Parser)]
#[command(name = "countup", version, about)]
struct Args {
    /// Page script (TOML) with elements and scroll/removal events.
    script: PathBuf,

    /// Options file (TOML); overrides the script's `[options]` table.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Pace frames on the wall clock instead of simulated time.
    #[arg(long)]
    realtime: bool,
}

fn log_report(report: &FrameReport) {
    for change in &report.changes {
        log::info!(
            "{:>8.1}ms  counter {} {}: {}",
            report.time_ms,
            change.index,
            change.element,
            change.text
        );
    }
}

fn run_realtime(playback: &mut Playback) {
    let interval = Duration::from_secs_f64(playback.timing().frame_interval_ms / 1000.0);
    let clock = FrameClock::start();
    while !playback.is_finished() {
        std::thread::sleep(interval);
        log_report(&playback.advance_to(clock.now_ms()));
    }
}

fn load_playback(args: &Args) -> Result<Playback, CountUpError> {
    let options = args.options.as_deref().map(Options::load).transpose()?;
    Script::load(&args.script)?.into_playback(options)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();
    let mut playback = match load_playback(&args) {
        Ok(playback) => playback,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "loaded {} element(s), {} observed",
        playback.element_ids().len(),
        playback.page().observed_count()
    );

    if args.realtime {
        run_realtime(&mut playback);
    } else {
        playback.run(log_report);
    }
    log::info!("all counters settled");
}
