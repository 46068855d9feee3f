//! The carousel state machine.
//!
//! All index transitions go through one place: a successful index change
//! resets progress and restarts the cycle. The autoplay timer is a
//! cancellable delay under [`AUTOPLAY_TIMER`] that re-arms itself on every
//! tick until the cycle completes, so starting a new cycle always replaces
//! the previous loop.

use crate::config::CarouselConfig;
use crate::navigation::{step, wrap_checked};
use crate::types::{CarouselAction, CarouselState, Slide};
use marquee_core::effect::{Effect, EffectId};
use marquee_core::environment::Clock;
use marquee_core::reducer::Reducer;
use marquee_core::{SmallVec, smallvec};
use marquee_runtime::metrics::CarouselMetrics;
use std::marker::PhantomData;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

/// Id of the autoplay tick loop
pub const AUTOPLAY_TIMER: EffectId = EffectId::new("carousel.autoplay");

/// Carousel environment
#[derive(Debug, Clone)]
pub struct CarouselEnvironment<C: Clock> {
    /// Time source for cycle measurement
    pub clock: C,
    /// Cycle and tick timing
    pub config: CarouselConfig,
}

impl<C: Clock> CarouselEnvironment<C> {
    /// Create a new carousel environment
    #[must_use]
    pub const fn new(clock: C, config: CarouselConfig) -> Self {
        Self { clock, config }
    }
}

/// Carousel reducer
///
/// Generic over the Clock type C to work with any clock implementation.
#[derive(Debug, Clone, Copy)]
pub struct CarouselReducer<C> {
    _phantom: PhantomData<C>,
}

impl<C> CarouselReducer<C> {
    /// Create a new carousel reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<C> Default for CarouselReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

type Effects = SmallVec<[Effect<CarouselAction>; 4]>;

impl<C: Clock> Reducer for CarouselReducer<C> {
    type State = CarouselState;
    type Action = CarouselAction;
    type Environment = CarouselEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects {
        match action {
            CarouselAction::Mount => {
                if state.mounted {
                    return smallvec![Effect::None];
                }
                state.mounted = true;
                tracing::info!(slides = state.slides.len(), "Carousel mounted");
                restart_cycle(state, env)
            },
            CarouselAction::Unmount => {
                if !state.mounted {
                    return smallvec![Effect::None];
                }
                state.mounted = false;
                tracing::info!(index = state.current_index, "Carousel unmounted");
                restart_cycle(state, env)
            },
            CarouselAction::Tick { generation } => tick(state, generation, env),
            CarouselAction::GoToNext => navigate(state, 1, "next", env),
            CarouselAction::GoToPrev => navigate(state, -1, "prev", env),
            CarouselAction::GoToSlide(index) => match wrap_checked(index, state.slides.len()) {
                Some(target) => change_index(state, target, "select", env),
                None => smallvec![Effect::None],
            },
            CarouselAction::TogglePlay => {
                state.is_playing = !state.is_playing;
                tracing::debug!(is_playing = state.is_playing, "Playback toggled");
                restart_cycle(state, env)
            },
            CarouselAction::ReplaceSlides(slides) => replace_slides(state, slides, env),
        }
    }
}

/// Advance progress, completing the cycle once the full duration has elapsed
fn tick<C: Clock>(
    state: &mut CarouselState,
    generation: u64,
    env: &CarouselEnvironment<C>,
) -> Effects {
    if generation != state.generation || !state.is_timer_active() {
        tracing::trace!(
            generation,
            current = state.generation,
            "Ignoring stale autoplay tick"
        );
        return smallvec![Effect::None];
    }

    let Some(started) = state.cycle_started_at else {
        return smallvec![Effect::None];
    };

    state.progress = cycle_fraction(env.clock.now() - started, env.config.cycle_duration);

    if state.progress >= 1.0 {
        navigate(state, 1, "autoplay", env)
    } else {
        smallvec![arm(state.generation, &env.config)]
    }
}

fn navigate<C: Clock>(
    state: &mut CarouselState,
    delta: i64,
    trigger: &'static str,
    env: &CarouselEnvironment<C>,
) -> Effects {
    let Some(len) = NonZeroUsize::new(state.slides.len()) else {
        return smallvec![Effect::None];
    };
    change_index(state, step(state.current_index, delta, len), trigger, env)
}

/// Move to `to`; a successful change resets progress and restarts the cycle
///
/// Landing on the slide already shown is not a change.
fn change_index<C: Clock>(
    state: &mut CarouselState,
    to: usize,
    trigger: &'static str,
    env: &CarouselEnvironment<C>,
) -> Effects {
    let from = state.current_index;
    if to == from {
        return smallvec![Effect::None];
    }

    if let Some(started) = state.cycle_started_at {
        let dwell = (env.clock.now() - started).to_std().unwrap_or(Duration::ZERO);
        CarouselMetrics::record_dwell(dwell);
    }
    CarouselMetrics::record_slide_change(trigger);
    tracing::debug!(from, to, trigger, "Slide changed");

    state.current_index = to;
    state.progress = 0.0;
    restart_cycle(state, env)
}

fn replace_slides<C: Clock>(
    state: &mut CarouselState,
    slides: Vec<Slide>,
    env: &CarouselEnvironment<C>,
) -> Effects {
    let previous_len = state.slides.len();
    let previous_index = state.current_index;
    state.slides = Arc::from(slides);

    let Some(len) = NonZeroUsize::new(state.slides.len()) else {
        tracing::debug!(previous_len, "Slide list emptied");
        state.current_index = 0;
        state.progress = 0.0;
        return restart_cycle(state, env);
    };

    state.current_index = step(previous_index, 0, len);

    if state.current_index != previous_index {
        CarouselMetrics::record_slide_change("resize");
        tracing::debug!(
            from = previous_index,
            to = state.current_index,
            trigger = "resize",
            "Slide changed"
        );
    } else if len.get() == previous_len {
        return smallvec![Effect::None];
    }

    state.progress = 0.0;
    restart_cycle(state, env)
}

/// Start a new cycle, or stop the timer when it should not run
///
/// Bumping the generation invalidates any tick still in flight for the
/// previous cycle.
fn restart_cycle<C: Clock>(state: &mut CarouselState, env: &CarouselEnvironment<C>) -> Effects {
    state.generation = state.generation.wrapping_add(1);

    if state.is_timer_active() {
        state.cycle_started_at = Some(env.clock.now());
        smallvec![arm(state.generation, &env.config)]
    } else {
        state.cycle_started_at = None;
        smallvec![Effect::Cancel(AUTOPLAY_TIMER)]
    }
}

fn arm(generation: u64, config: &CarouselConfig) -> Effect<CarouselAction> {
    Effect::cancellable(
        AUTOPLAY_TIMER,
        Effect::Delay {
            duration: config.tick_interval,
            action: Box::new(CarouselAction::Tick { generation }),
        },
    )
}

/// `min(1, elapsed / cycle)`; time running backwards counts as no progress
fn cycle_fraction(elapsed: chrono::Duration, cycle: Duration) -> f64 {
    if cycle.is_zero() {
        return 1.0;
    }
    let elapsed = elapsed.to_std().unwrap_or(Duration::ZERO);
    (elapsed.as_secs_f64() / cycle.as_secs_f64()).min(1.0)
}
