//! A carousel running on a [`Store`].

use crate::config::CarouselConfig;
use crate::reducer::{CarouselEnvironment, CarouselReducer};
use crate::types::{CarouselAction, CarouselState, CarouselView, Slide};
use marquee_core::environment::Clock;
use marquee_runtime::{EffectHandle, Store, StoreError};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Store type driving one carousel
pub type CarouselStore<C> =
    Store<CarouselState, CarouselAction, CarouselEnvironment<C>, CarouselReducer<C>>;

/// One mounted-or-not carousel instance
///
/// Wraps the store so the rendering layer only sees the navigation
/// operations and a [`CarouselView`]. Clones share the same carousel.
#[derive(Clone)]
pub struct Carousel<C>
where
    C: Clock + Clone + 'static,
{
    store: CarouselStore<C>,
}

impl<C> Carousel<C>
where
    C: Clock + Clone + 'static,
{
    /// Create an unmounted carousel; call [`Carousel::mount`] to start autoplay
    #[must_use]
    pub fn new(slides: impl Into<Arc<[Slide]>>, clock: C, config: CarouselConfig) -> Self {
        let state = CarouselState::from_config(slides, &config);
        let env = CarouselEnvironment::new(clock, config);
        Self {
            store: Store::new(state, CarouselReducer::new(), env),
        }
    }

    /// Wrap an existing store
    #[must_use]
    pub const fn from_store(store: CarouselStore<C>) -> Self {
        Self { store }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &CarouselStore<C> {
        &self.store
    }

    /// Put the carousel on screen and start the autoplay timer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`Carousel::unmount`].
    pub async fn mount(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::Mount).await
    }

    /// Show the next slide
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`Carousel::unmount`].
    pub async fn go_to_next(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::GoToNext).await
    }

    /// Show the previous slide
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`Carousel::unmount`].
    pub async fn go_to_prev(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::GoToPrev).await
    }

    /// Show the slide at `index`, wrapping out-of-range values
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`Carousel::unmount`].
    pub async fn go_to_slide(&self, index: i64) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::GoToSlide(index)).await
    }

    /// Pause or resume autoplay
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`Carousel::unmount`].
    pub async fn toggle_play(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::TogglePlay).await
    }

    /// Swap in a new slide list
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`Carousel::unmount`].
    pub async fn replace_slides(&self, slides: Vec<Slide>) -> Result<EffectHandle, StoreError> {
        self.store.send(CarouselAction::ReplaceSlides(slides)).await
    }

    /// Current render snapshot
    pub async fn view(&self) -> CarouselView {
        self.store.state(CarouselState::view).await
    }

    /// The slide on screen, if any
    pub async fn current_slide(&self) -> Option<Slide> {
        self.store.state(|s| s.current_slide().cloned()).await
    }

    /// Ticks and other timer-produced actions, for renderers that redraw on change
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CarouselAction> {
        self.store.subscribe_actions()
    }

    /// Take the carousel off screen and release its timer
    ///
    /// The carousel accepts no further actions afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects fail to drain, or
    /// [`StoreError::ShutdownInProgress`] if already unmounted.
    pub async fn unmount(&self) -> Result<(), StoreError> {
        self.store.send(CarouselAction::Unmount).await?;
        self.store.shutdown_gracefully().await
    }
}
