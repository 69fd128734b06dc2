use blackbear::{preload_hints, BatchJob, FrameScheduler, IntervalFrames, Settings};
use chrono::Local;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("blackbear_runtime=debug")
        .init();

    let settings = Settings::default();
    let scheduler = FrameScheduler::new(IntervalFrames::new(settings.runtime.frame_interval)?);

    for hint in preload_hints(["/css/style.css", "/js/even.js", "/fonts/chancery.woff2"]) {
        println!("{}", hint);
    }

    // 1000 lazy images, decoded a batch per frame
    let images: Vec<String> = (0..1000).map(|i| format!("/img/photo-{i:04}.jpg")).collect();
    let job = BatchJob::spawn(&scheduler, images, settings.runtime.batch_size, |src| {
        if src.ends_with("0999.jpg") {
            let now = Local::now().format("%H:%M:%S%.3f");
            println!("[{}] 🖼️  last image swapped in: {}", now, src);
        }
    });

    while !job.is_finished() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    println!(
        "✅ {} images over {} frames, loop running: {}",
        job.processed(),
        scheduler.ticks(),
        scheduler.is_running()
    );
    Ok(())
}
