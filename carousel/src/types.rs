//! Domain types for the hero carousel.
//!
//! Slides are caller-owned display records; the carousel only reads them.
//! [`CarouselState`] is owned exclusively by the reducer, which keeps
//! `current_index < slide_count` whenever there are slides.

use crate::config::CarouselConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One promotional banner slide
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Headline text
    pub heading: String,
    /// Subtext fragments, rendered in order
    #[serde(default)]
    pub subtext: Vec<String>,
    /// Reference to the background image (path, URL, or asset key)
    pub image_ref: String,
}

impl Slide {
    /// Create a slide
    #[must_use]
    pub fn new<I, S>(heading: impl Into<String>, subtext: I, image_ref: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            heading: heading.into(),
            subtext: subtext.into_iter().map(Into::into).collect(),
            image_ref: image_ref.into(),
        }
    }
}

/// Everything that can happen to a carousel
#[derive(Clone, Debug, PartialEq)]
pub enum CarouselAction {
    /// The carousel appeared on screen; autoplay may start
    Mount,
    /// The carousel left the screen; the timer is released
    Unmount,
    /// Autoplay timer tick for the cycle with this generation
    Tick {
        /// Cycle generation the tick was scheduled for
        generation: u64,
    },
    /// Show the next slide, wrapping to the first
    GoToNext,
    /// Show the previous slide, wrapping to the last
    GoToPrev,
    /// Show the slide at any index, normalized by wraparound
    GoToSlide(i64),
    /// Flip between playing and paused
    TogglePlay,
    /// The collaborator supplied a new slide list
    ReplaceSlides(Vec<Slide>),
}

/// Carousel state
#[derive(Clone, Debug)]
pub struct CarouselState {
    pub(crate) slides: Arc<[Slide]>,
    pub(crate) current_index: usize,
    pub(crate) is_playing: bool,
    pub(crate) progress: f64,
    pub(crate) mounted: bool,
    /// When the current cycle started; `None` while the timer is suspended
    pub(crate) cycle_started_at: Option<DateTime<Utc>>,
    /// Bumped on every cycle restart so ticks from older cycles are ignored
    pub(crate) generation: u64,
}

impl CarouselState {
    /// Unmounted carousel at the first slide, playing
    #[must_use]
    pub fn new(slides: impl Into<Arc<[Slide]>>) -> Self {
        Self {
            slides: slides.into(),
            current_index: 0,
            is_playing: true,
            progress: 0.0,
            mounted: false,
            cycle_started_at: None,
            generation: 0,
        }
    }

    /// Unmounted carousel whose play state follows `config.autoplay`
    #[must_use]
    pub fn from_config(slides: impl Into<Arc<[Slide]>>, config: &CarouselConfig) -> Self {
        Self {
            is_playing: config.autoplay,
            ..Self::new(slides)
        }
    }

    /// All slides, in display order
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Number of slides
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Index of the slide on screen
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// The slide on screen; `None` for an empty carousel
    #[must_use]
    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current_index)
    }

    /// Whether autoplay is switched on
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Fraction of the current cycle elapsed, in `[0, 1]`
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Progress as a percentage, ready for a progress bar width
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.progress * 100.0
    }

    /// Whether the carousel is on screen
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Generation of the current cycle
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// When the current cycle started, if the timer is running
    #[must_use]
    pub const fn cycle_started_at(&self) -> Option<DateTime<Utc>> {
        self.cycle_started_at
    }

    /// Whether the autoplay timer should be running
    ///
    /// The timer runs only while mounted, playing, and with more than one
    /// slide to rotate through.
    #[must_use]
    pub fn is_timer_active(&self) -> bool {
        self.mounted && self.is_playing && self.slides.len() > 1
    }

    /// Snapshot for the rendering layer
    #[must_use]
    pub fn view(&self) -> CarouselView {
        CarouselView {
            current_index: self.current_index,
            slide_count: self.slides.len(),
            is_playing: self.is_playing,
            progress: self.progress,
        }
    }
}

/// What a renderer needs to draw the banner chrome
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselView {
    /// Index of the slide on screen
    pub current_index: usize,
    /// Number of slides (0 renders nothing)
    pub slide_count: usize,
    /// Play/pause button state
    pub is_playing: bool,
    /// Progress bar fill in `[0, 1]`
    pub progress: f64,
}

impl CarouselView {
    /// Whether there is anything to render
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slide_count == 0
    }

    /// Whether the indicator at `index` is the active one
    #[must_use]
    pub const fn is_current(&self, index: usize) -> bool {
        !self.is_empty() && index == self.current_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_json_shape() {
        let slide: Result<Slide, _> = serde_json::from_str(
            r#"{"heading":"Top up","subtext":["Instant","Safe"],"imageRef":"hero/1.webp"}"#,
        );

        assert_eq!(
            slide.ok(),
            Some(Slide::new("Top up", ["Instant", "Safe"], "hero/1.webp"))
        );
    }

    #[test]
    fn test_subtext_defaults_to_empty() {
        let slide: Result<Slide, _> =
            serde_json::from_str(r#"{"heading":"Gift cards","imageRef":"hero/2.webp"}"#);
        assert!(slide.is_ok_and(|s| s.subtext.is_empty()));
    }

    #[test]
    fn test_new_state_is_unmounted_and_playing() {
        let state = CarouselState::new(vec![Slide::new("A", ["a"], "a.png")]);

        assert_eq!(state.current_index(), 0);
        assert!(state.is_playing());
        assert!(!state.is_mounted());
        assert!(!state.is_timer_active());
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_from_config_respects_autoplay() {
        let config = CarouselConfig::default().with_autoplay(false);
        let state = CarouselState::from_config(Vec::new(), &config);
        assert!(!state.is_playing());
    }

    #[test]
    fn test_empty_view_has_no_current_indicator() {
        let view = CarouselState::new(Vec::new()).view();
        assert!(view.is_empty());
        assert!(!view.is_current(0));
        assert!(CarouselState::new(Vec::new()).current_slide().is_none());
    }
}
