//! # Hero Banner
//!
//! A terminal rendering of the storefront hero banner. The carousel engine
//! owns the slide index, play state, and progress; this crate only loads the
//! slide catalog, draws what the engine exposes, and maps keys to the
//! navigation operations.

use anyhow::{Context, Result};
use marquee_carousel::{CarouselView, Slide};
use std::path::Path;

/// Slides shown when no catalog file is configured
#[must_use]
pub fn default_slides() -> Vec<Slide> {
    vec![
        Slide::new(
            "Level up instantly",
            ["Game credits delivered", "in seconds"],
            "hero/instant-topup.webp",
        ),
        Slide::new(
            "Gift cards for every gamer",
            ["Steam, PlayStation, Xbox", "and more"],
            "hero/gift-cards.webp",
        ),
        Slide::new(
            "Weekend deals",
            ["Up to 20% off", "selected e-pins"],
            "hero/weekend-deals.webp",
        ),
        Slide::new(
            "Safe and secure",
            ["Verified codes", "24/7 support"],
            "hero/secure-checkout.webp",
        ),
    ]
}

/// Parse a JSON array of slides
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of slide records.
pub fn parse_slides(json: &str) -> Result<Vec<Slide>> {
    serde_json::from_str(json).context("Slide catalog must be a JSON array of slides")
}

/// Load the slide catalog from `path`
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_slides(path: &Path) -> Result<Vec<Slide>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read slide catalog {}", path.display()))?;
    parse_slides(&json).with_context(|| format!("Invalid slide catalog {}", path.display()))
}

/// What a key press asks the carousel to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show the next slide
    Next,
    /// Show the previous slide
    Prev,
    /// Jump to a slide (1-based on the keyboard, 0-based here)
    Select(i64),
    /// Pause or resume autoplay
    TogglePlay,
    /// Leave the banner
    Quit,
}

impl Command {
    /// Parse one line of keyboard input
    ///
    /// `n`/`p` navigate, a number selects a slide, `t` or a blank line
    /// toggles playback, `q` quits.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" | "t" | "space" => Some(Self::TogglePlay),
            "n" | ">" => Some(Self::Next),
            "p" | "<" => Some(Self::Prev),
            "q" | "quit" | "exit" => Some(Self::Quit),
            other => other.parse::<i64>().ok().map(|n| Self::Select(n - 1)),
        }
    }
}

/// Progress bar width in cells
pub const BAR_WIDTH: usize = 40;

/// Render the banner chrome: indicators, play state, and progress bar
#[must_use]
pub fn render(view: &CarouselView, slide: Option<&Slide>) -> String {
    let Some(slide) = slide.filter(|_| !view.is_empty()) else {
        return String::new();
    };

    let indicators: String = (0..view.slide_count)
        .map(|i| if view.is_current(i) { '●' } else { '○' })
        .collect();

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((view.progress.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);

    format!(
        "{heading} | {subtext}\n{indicators} {state} [{bar}{rest}] {percent:>3.0}%",
        heading = slide.heading,
        subtext = slide.subtext.join(" "),
        state = if view.is_playing { "▶" } else { "⏸" },
        bar = "█".repeat(filled),
        rest = " ".repeat(BAR_WIDTH - filled),
        percent = view.progress * 100.0,
    )
}
