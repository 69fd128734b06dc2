use blackbear_runtime::{
    BoxError, FrameCallback, FrameScheduler, IntervalFrames, ManualFrames, RunState,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("blackbear_runtime=debug")
        .with_test_writer()
        .try_init();
}

fn counting() -> (Arc<AtomicUsize>, FrameCallback) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let callback = FrameCallback::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (hits, callback)
}

#[test]
fn remove_before_first_tick_means_zero_invocations() {
    let (scheduler, frames) = FrameScheduler::manual();
    let (hits, callback) = counting();

    let handle = scheduler.add(callback);
    handle.remove();
    handle.remove();

    frames.fire();
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(scheduler.run_state(), RunState::Idle);
    assert_eq!(frames.pending(), 0);
}

#[test]
fn callback_removing_itself_never_runs_again() {
    let (scheduler, frames) = FrameScheduler::manual();
    let hits = Arc::new(AtomicUsize::new(0));

    // the callback needs its own identity to remove itself
    let slot: Arc<Mutex<Option<FrameCallback>>> = Arc::new(Mutex::new(None));
    let callback = {
        let scheduler = scheduler.clone();
        let slot = slot.clone();
        let hits = hits.clone();
        FrameCallback::new(move || {
            hits.fetch_add(1, Ordering::SeqCst);
            if let Some(me) = slot.lock().unwrap().as_ref() {
                scheduler.remove(me);
            }
        })
    };
    *slot.lock().unwrap() = Some(callback.clone());
    scheduler.add(callback);

    frames.fire();
    frames.fire();
    frames.fire();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(!scheduler.is_running());
}

#[test]
fn failing_callback_is_contained_and_retried_next_tick() {
    init_tracing();
    let (scheduler, frames) = FrameScheduler::manual();

    let a_calls = Arc::new(AtomicUsize::new(0));
    let a = {
        let a_calls = a_calls.clone();
        FrameCallback::new(move || -> Result<(), BoxError> {
            a_calls.fetch_add(1, Ordering::SeqCst);
            Err("highlight target vanished".into())
        })
    };
    let log = Arc::new(Mutex::new(Vec::new()));
    let b = {
        let log = log.clone();
        FrameCallback::new(move || log.lock().unwrap().push("ran"))
    };

    scheduler.add(a);
    scheduler.add(b);

    frames.fire();
    assert_eq!(*log.lock().unwrap(), vec!["ran"]);

    frames.fire();
    assert_eq!(a_calls.load(Ordering::SeqCst), 2);
    assert_eq!(*log.lock().unwrap(), vec!["ran", "ran"]);
    assert!(scheduler.is_running());
}

#[test]
fn panicking_callback_does_not_stop_siblings() {
    init_tracing();
    let (scheduler, frames) = FrameScheduler::manual();
    let (hits, sibling) = counting();

    scheduler.add(FrameCallback::new(|| -> () { panic!("lazy image decode failed") }));
    scheduler.add(sibling);

    frames.fire();
    frames.fire();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(scheduler.ticks(), 2);
}

#[test]
fn clear_stops_all_work_and_frame_requests() {
    let (scheduler, frames) = FrameScheduler::manual();
    let counters: Vec<_> = (0..4)
        .map(|_| {
            let (hits, callback) = counting();
            scheduler.add(callback);
            hits
        })
        .collect();

    let requested = frames.requested();
    scheduler.clear();
    assert_eq!(scheduler.run_state(), RunState::Idle);

    frames.fire();
    frames.fire();
    assert!(counters.iter().all(|c| c.load(Ordering::SeqCst) == 0));
    assert_eq!(frames.requested(), requested);
    assert_eq!(scheduler.ticks(), 0);
}

#[test]
fn at_most_one_outstanding_request() {
    let frames = ManualFrames::new();
    let scheduler = FrameScheduler::new(frames.clone());
    let handles: Vec<_> = (0..3).map(|_| scheduler.add(counting().1)).collect();
    assert_eq!(frames.pending(), 1);

    for _ in 0..5 {
        frames.fire();
        assert_eq!(frames.pending(), 1);
    }

    for handle in &handles {
        handle.remove();
    }
    assert_eq!(frames.pending(), 0);
    assert_eq!(frames.requested(), 6);
}

#[tokio::test(start_paused = true)]
async fn interval_frames_drive_the_loop_until_removed() {
    init_tracing();
    let scheduler = FrameScheduler::new(IntervalFrames::new(Duration::from_millis(16)).unwrap());
    let (hits, callback) = counting();

    let handle = scheduler.add(callback);
    tokio::time::sleep(Duration::from_millis(16 * 5 + 8)).await;
    let seen = hits.load(Ordering::SeqCst);
    assert!((4..=5).contains(&seen), "ran {} times", seen);

    handle.remove();
    assert!(!scheduler.is_running());
    assert_eq!(scheduler.source().pending(), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(hits.load(Ordering::SeqCst), seen);
}
