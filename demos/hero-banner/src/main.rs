//! Hero banner binary
//!
//! Drives a carousel on the system clock and redraws it in the terminal.
//!
//! Environment:
//! - `HERO_SLIDES_PATH`: JSON slide catalog (built-in slides otherwise)
//! - `HERO_METRICS=1`: print Prometheus metrics on exit
//! - `MARQUEE_*`: carousel timing, see `marquee_carousel::config`
//! - `RUST_LOG`: log filter

use anyhow::{Context, Result};
use hero_banner::{Command, default_slides, load_slides, render};
use marquee_carousel::{Carousel, CarouselConfig};
use marquee_core::environment::SystemClock;
use marquee_runtime::metrics::MetricsRecorder;
use std::path::PathBuf;
use std::sync::Once;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    "hero_banner=info,marquee_carousel=debug,marquee_runtime=info".into()
                }),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
    });
}

fn metrics_enabled() -> bool {
    std::env::var("HERO_METRICS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let mut metrics = MetricsRecorder::new();
    if metrics_enabled() {
        metrics.start().context("Failed to start metrics recorder")?;
    }

    let config = CarouselConfig::from_env().context("Invalid carousel configuration")?;
    let slides = match std::env::var_os("HERO_SLIDES_PATH").map(PathBuf::from) {
        Some(path) => load_slides(&path)?,
        None => default_slides(),
    };
    tracing::info!(
        slides = slides.len(),
        cycle_ms = config.cycle_duration.as_millis(),
        "Starting hero banner"
    );

    let carousel = Carousel::new(slides, SystemClock, config);
    carousel.mount().await?;

    println!("n = next, p = prev, <number> = select, t/enter = play/pause, q = quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);

    loop {
        tokio::select! {
            _ = redraw.tick() => {
                let view = carousel.view().await;
                let slide = carousel.current_slide().await;
                println!("{}\n", render(&view, slide.as_ref()));
            },
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                let sent = match Command::parse(&line) {
                    Some(Command::Next) => carousel.go_to_next().await,
                    Some(Command::Prev) => carousel.go_to_prev().await,
                    Some(Command::Select(index)) => carousel.go_to_slide(index).await,
                    Some(Command::TogglePlay) => carousel.toggle_play().await,
                    Some(Command::Quit) => break,
                    None => {
                        tracing::warn!(input = %line.trim(), "Unknown command");
                        continue;
                    },
                };
                sent?;
                redraw.reset_immediately();
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    carousel.unmount().await?;
    tracing::info!("Hero banner stopped");

    if let Some(text) = metrics.render() {
        println!("{text}");
    }

    Ok(())
}
