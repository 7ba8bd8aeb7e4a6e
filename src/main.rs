use std::io::{self, Read};
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use aurora_engine::config::{parse_config, plan_jobs};
use aurora_engine::error::AuroraError;
use aurora_engine::{render_frame, FrameContext};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        error!(%err, "render failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AuroraError> {
    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;

    let jobs = plan_jobs(parse_config(&raw)?)?;
    let total = jobs.len();

    for (index, job) in jobs.iter().enumerate() {
        let started = Instant::now();
        let frame = FrameContext::new(job.width, job.height, job.elapsed_time);
        let buffer = render_frame(frame, job.params)?;
        buffer.save_png(&job.output_path)?;

        info!(
            frame = index + 1,
            total,
            elapsed_time = job.elapsed_time,
            elapsed_ms = started.elapsed().as_millis() as u64,
            output = %job.output_path,
            "rendered frame"
        );
    }

    Ok(())
}
