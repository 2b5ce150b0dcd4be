use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use console::style;
use tranche::{logging, DriveFetcher, Error, HttpFetcher, Item, Result, SchedulerBuilder};

const OUTPUT_DIR: &str = "downloads";
const EXTENSION: &str = "mp4";
const WORKERS: usize = 2;
const PACING: Duration = Duration::from_secs(15);
const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

const ITEMS: &[(&str, &str)] = &[
    ("2Yil2Ay1Gun", "https://drive.google.com/file/d/1Fp6KtxxwM-lZHqElbq7Dw6LuNGpzrY5v/view?usp=sharing"),
    ("2Yil2Ay2Gun", "https://drive.google.com/file/d/1zdzoGm0qWaAptK0scP5Xx3IU7OzcsVP5/view?usp=sharing"),
    ("2Yil3Ay1Gun", "https://drive.google.com/file/d/1494TzoI-FTRtsGqQ3YDkG2vBILQlyOlL/view?usp=sharing"),
    ("2Yil3Ay2Gun", "https://drive.google.com/file/d/1Bl3H53ky42V4rn1mOha2i101xwapOgYv/view?usp=sharing"),
    ("2Yil4Ay1Gun", "https://drive.google.com/file/d/1rPAHNvo0hlvxGIMOSL9ZDqrr8g2moMFR/view?usp=sharing"),
    ("2Yil4Ay2Gun", "https://drive.google.com/file/d/1M0grVv_duuV1_h3R60aY1K752N9ziAto/view?usp=sharing"),
    ("2Yil5Ay1Gun", "https://drive.google.com/file/d/1kFNJ9Q_sdKE0TuvrKGIEOVBYTVtlOpBx/view?usp=sharing"),
    ("2Yil5Ay2Gun", "https://drive.google.com/file/d/1lr8sE76qE2C29EGU5oWXQiSerap15Rkx/view?usp=sharing"),
    ("2Yil6Ay2Gun", "https://drive.google.com/file/d/1aAbmO-40XPLbA7jcOQPQ6hU1C5PxaF8t/view?usp=sharing"),
    ("2Yil8Ay1Gun", "https://drive.google.com/file/d/1TAp4pLgeZJKObmVyrZ7ugh3bwjc4xYG0/view?usp=sharing"),
];

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Cancelled) => {
            println!("\n{}", style("[CANCELLED] Downloads stopped.").yellow());
            ExitCode::from(130)
        }
        Err(e) => {
            println!("\n{} {}", style("[ERROR]").red(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let directory = PathBuf::from(OUTPUT_DIR);
    tokio::fs::create_dir_all(&directory).await?;

    let items: Vec<Item> = ITEMS.iter().map(|&(name, url)| Item::new(name, url)).collect();

    let scheduler = SchedulerBuilder::new()
        .directory(directory)
        .extension(EXTENSION)
        .workers(WORKERS)
        .pacing(PACING)
        .progress_interval(PROGRESS_INTERVAL)
        .build(DriveFetcher::new(HttpFetcher::with_config(Default::default())?));

    println!(
        "{} Downloading {} files into {}/",
        style("[START]").cyan(),
        items.len(),
        OUTPUT_DIR
    );

    let summary = scheduler.run_until(&items, shutdown()).await?;

    println!(
        "\n{} {} completed, {} failed in {:.1}s",
        style("[DONE]").green(),
        summary.completed(),
        summary.failed(),
        summary.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed the run is never
/// interrupted.
async fn shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Unable to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
