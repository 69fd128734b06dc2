use blackbear::state::{active_toc_link, show_back_to_top};
use blackbear::{FrameCallback, FrameScheduler, IntervalFrames, RuntimeSettings};
use chrono::Local;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Simulated scroll position, written by the scroll handler and read once per frame
static SCROLL_Y: AtomicU32 = AtomicU32::new(0);

const HEADINGS: [&str; 4] = ["intro", "setup", "usage", "faq"];
const HEADING_TOPS: [f64; 4] = [120.0, 400.0, 900.0, 1500.0];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("blackbear_runtime=debug")
        .init();

    let settings = RuntimeSettings::default();
    let scheduler = FrameScheduler::new(IntervalFrames::new(settings.frame_interval)?);

    // Scroll events arrive far faster than frames; the throttle drops most of them
    let on_scroll = settings.throttle_scroll(|y: u32| SCROLL_Y.store(y, Ordering::Relaxed));

    let last = Arc::new(std::sync::Mutex::new((None::<usize>, false)));
    let highlight = {
        let last = last.clone();
        FrameCallback::new(move || {
            let y = f64::from(SCROLL_Y.load(Ordering::Relaxed));
            let current = (active_toc_link(&HEADING_TOPS, y), show_back_to_top(y));
            let mut last = last.lock().unwrap();
            if *last != current {
                let now = Local::now().format("%H:%M:%S%.3f");
                let heading = current.0.map_or("-", |i| HEADINGS[i]);
                println!(
                    "[{}] 📍 TOC highlight -> #{} (back to top: {})",
                    now, heading, current.1
                );
                *last = current;
            }
        })
    };
    let handle = scheduler.add(highlight);

    let mut dropped = 0;
    for y in (0..1800).step_by(10) {
        if !on_scroll.call(y) {
            dropped += 1;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    handle.remove();
    println!(
        "✅ Done: {} frames, {} scroll events dropped, loop running: {}",
        scheduler.ticks(),
        dropped,
        scheduler.is_running()
    );
    Ok(())
}
