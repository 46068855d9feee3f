//! Integration tests for the carousel running on a Store
//!
//! Time is paused, so the tokio clock only moves when every task is idle
//! and then jumps straight to the next timer. `TokioClock` reads that same
//! clock, which makes tick timing exact.

use marquee_carousel::{AUTOPLAY_TIMER, Carousel, CarouselAction, CarouselConfig, Slide};
use marquee_runtime::StoreError;
use marquee_testing::TokioClock;
use std::time::Duration;
use tokio::time::sleep;

fn slides(count: usize) -> Vec<Slide> {
    (0..count)
        .map(|i| Slide::new(format!("Slide {i}"), ["Instant delivery"], format!("hero/{i}.webp")))
        .collect()
}

async fn mounted(count: usize) -> Carousel<TokioClock> {
    let carousel = Carousel::new(slides(count), TokioClock::default(), CarouselConfig::default());
    assert!(carousel.mount().await.is_ok());
    carousel
}

#[tokio::test(start_paused = true)]
async fn test_autoplay_advances_each_cycle() {
    let carousel = mounted(5).await;

    sleep(Duration::from_millis(8100)).await;
    assert_eq!(carousel.view().await.current_index, 1);

    sleep(Duration::from_millis(8000)).await;
    assert_eq!(carousel.view().await.current_index, 2);
}

#[tokio::test(start_paused = true)]
async fn test_cycle_boundary_fires_once() {
    let carousel = mounted(5).await;

    sleep(Duration::from_millis(7990)).await;
    assert_eq!(carousel.view().await.current_index, 0);

    sleep(Duration::from_millis(20)).await;
    assert_eq!(carousel.view().await.current_index, 1);

    sleep(Duration::from_millis(7960)).await;
    assert_eq!(carousel.view().await.current_index, 1);
}

#[tokio::test(start_paused = true)]
async fn test_progress_tracks_elapsed_time() {
    let carousel = mounted(3).await;

    // Last tick lands on 4000 ms, half the cycle
    sleep(Duration::from_millis(4008)).await;
    let view = carousel.view().await;

    assert_eq!(view.current_index, 0);
    assert!((view.progress - 0.5).abs() < f64::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn test_single_slide_never_advances() {
    let carousel = mounted(1).await;

    sleep(Duration::from_millis(30_000)).await;

    let view = carousel.view().await;
    assert_eq!(view.current_index, 0);
    assert_eq!(view.progress, 0.0);
    assert_eq!(carousel.store().active_effects(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_pause_holds_progress() {
    let carousel = mounted(4).await;

    sleep(Duration::from_millis(4008)).await;
    assert!(carousel.toggle_play().await.is_ok());
    assert!(!carousel.store().is_effect_active(&AUTOPLAY_TIMER));

    sleep(Duration::from_millis(20_000)).await;
    let view = carousel.view().await;

    assert!(!view.is_playing);
    assert_eq!(view.current_index, 0);
    assert!((view.progress - 0.5).abs() < f64::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn test_resume_restarts_cycle() {
    let carousel = mounted(4).await;

    sleep(Duration::from_millis(6000)).await;
    assert!(carousel.toggle_play().await.is_ok());
    sleep(Duration::from_millis(1000)).await;
    assert!(carousel.toggle_play().await.is_ok());

    // 2 s left on the old window would have advanced by now
    sleep(Duration::from_millis(4000)).await;
    assert_eq!(carousel.view().await.current_index, 0);

    sleep(Duration::from_millis(4100)).await;
    assert_eq!(carousel.view().await.current_index, 1);
}

#[tokio::test(start_paused = true)]
async fn test_manual_navigation_restarts_cycle() {
    let carousel = mounted(5).await;

    sleep(Duration::from_millis(6000)).await;
    assert!(carousel.go_to_next().await.is_ok());

    let view = carousel.view().await;
    assert_eq!(view.current_index, 1);
    assert_eq!(view.progress, 0.0);

    sleep(Duration::from_millis(6000)).await;
    assert_eq!(carousel.view().await.current_index, 1);

    sleep(Duration::from_millis(2100)).await;
    assert_eq!(carousel.view().await.current_index, 2);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_navigation_keeps_one_timer() {
    let carousel = mounted(5).await;

    for index in [1, 3, -1, 2, 9] {
        assert!(carousel.go_to_slide(index).await.is_ok());
    }
    assert!(carousel.go_to_prev().await.is_ok());

    assert_eq!(carousel.view().await.current_index, 3);
    assert_eq!(carousel.store().active_effects(), 1);

    sleep(Duration::from_millis(8100)).await;
    assert_eq!(carousel.view().await.current_index, 4);
}

#[tokio::test(start_paused = true)]
#[allow(clippy::panic)] // Test assertion
async fn test_ticks_are_observable() {
    let carousel = mounted(2).await;
    let mut ticks = carousel.subscribe();

    let mut received = 0;
    while received < 3 {
        match ticks.recv().await {
            Ok(CarouselAction::Tick { .. }) => received += 1,
            Ok(_) => {},
            Err(error) => panic!("tick stream failed: {error}"),
        }
    }

    assert!(carousel.view().await.progress > 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_replacing_slides_reclamps_running_carousel() {
    let carousel = mounted(5).await;
    assert!(carousel.go_to_slide(4).await.is_ok());

    assert!(carousel.replace_slides(slides(2)).await.is_ok());
    let view = carousel.view().await;
    assert_eq!(view.slide_count, 2);
    assert_eq!(view.current_index, 0);

    assert!(carousel.replace_slides(Vec::new()).await.is_ok());
    assert!(carousel.view().await.is_empty());
    assert!(carousel.current_slide().await.is_none());
    assert_eq!(carousel.store().active_effects(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_releases_timer() {
    let carousel = mounted(5).await;

    sleep(Duration::from_millis(100)).await;
    assert!(carousel.store().is_effect_active(&AUTOPLAY_TIMER));

    assert!(carousel.unmount().await.is_ok());
    assert_eq!(carousel.store().active_effects(), 0);

    let index = carousel.view().await.current_index;
    sleep(Duration::from_millis(20_000)).await;
    assert_eq!(carousel.view().await.current_index, index);

    assert!(matches!(
        carousel.go_to_next().await,
        Err(StoreError::ShutdownInProgress)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_autoplay_disabled_by_config() {
    let config = CarouselConfig::default().with_autoplay(false);
    let carousel = Carousel::new(slides(3), TokioClock::default(), config);
    assert!(carousel.mount().await.is_ok());

    sleep(Duration::from_millis(20_000)).await;
    let view = carousel.view().await;

    assert!(!view.is_playing);
    assert_eq!(view.current_index, 0);
    assert_eq!(carousel.store().active_effects(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_navigation_keeps_timer_alive() {
    let config = CarouselConfig::default()
        .with_cycle_duration(Duration::from_secs(3600))
        .with_tick_interval(Duration::from_millis(1));
    let carousel = Carousel::new(slides(5), TokioClock::default(), config);
    assert!(carousel.mount().await.is_ok());

    for round in 0..100 {
        let next = tokio::spawn({
            let carousel = carousel.clone();
            async move { carousel.go_to_next().await.is_ok() }
        });
        let select = tokio::spawn({
            let carousel = carousel.clone();
            async move { carousel.go_to_slide(round).await.is_ok() }
        });

        let (next, select) = tokio::join!(next, select);
        assert!(matches!((next, select), (Ok(true), Ok(true))));
    }

    // Whichever send reduced last owns the one surviving loop
    sleep(Duration::from_millis(50)).await;
    let view = carousel.view().await;

    assert!(view.is_playing);
    assert!(carousel.store().is_effect_active(&AUTOPLAY_TIMER));
    assert_eq!(carousel.store().active_effects(), 1);
    assert!(view.progress > 0.0);

    assert!(carousel.unmount().await.is_ok());
}
