//! # Marquee Carousel
//!
//! The autoplay engine behind a rotating hero banner.
//!
//! A carousel owns a slide index, a play/pause switch, and a progress value
//! in `[0, 1]` for the slide on screen. While playing, a cancellable tick
//! loop advances progress over a fixed cycle (8 seconds by default) and moves
//! to the next slide when the cycle completes. Manual navigation wraps
//! around either end and always restarts the cycle.
//!
//! ## Example
//!
//! ```no_run
//! use marquee_carousel::{Carousel, CarouselConfig, Slide};
//! use marquee_core::environment::SystemClock;
//!
//! # async fn example() -> Result<(), marquee_runtime::StoreError> {
//! let slides = vec![
//!     Slide::new("Top up instantly", ["Game credits in seconds"], "hero/topup.webp"),
//!     Slide::new("Gift cards", ["Delivered by email"], "hero/gift.webp"),
//! ];
//!
//! let carousel = Carousel::new(slides, SystemClock, CarouselConfig::default());
//! carousel.mount().await?;
//! carousel.go_to_slide(-1).await?;
//! assert_eq!(carousel.view().await.current_index, 1);
//! carousel.unmount().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod handle;
pub mod navigation;
pub mod reducer;
pub mod types;

pub use config::{CarouselConfig, ConfigError, DEFAULT_CYCLE_DURATION, DEFAULT_TICK_INTERVAL};
pub use handle::{Carousel, CarouselStore};
pub use navigation::wrap;
pub use reducer::{AUTOPLAY_TIMER, CarouselEnvironment, CarouselReducer};
pub use types::{CarouselAction, CarouselState, CarouselView, Slide};
