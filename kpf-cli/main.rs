use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use env_logger::Env;
use kpf_cli::kpf_core::init_thread_pool;
use kpf_cli::{run, CliArgs, CliResult, RunConfigFile};
use log::{info, warn};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match real_main(CliArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn real_main(args: CliArgs) -> CliResult<()> {
    let file = args.config.as_ref().map(RunConfigFile::load).transpose()?;
    let config = args.resolve(file)?;
    info!("{}", config.detector.summary());

    let threads = config.detector.thread_count();
    if let Err(e) = init_thread_pool(threads) {
        warn!("Keeping existing thread pool: {}", e);
    }

    let t0 = Instant::now();
    let summary = run(&config)?;
    info!(
        "{}x{}: {} of {} keypoints kept in {:.2?}",
        summary.width,
        summary.height,
        summary.kept,
        summary.detected,
        t0.elapsed()
    );

    Ok(())
}
