// Entry point: load settings, run the assembly pipeline once, report the outcome
use block_assembler::{pipeline, Opt, Settings};
use clap::Parser;
use log::{error, info, LevelFilter};
use std::process;

fn main() {
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    if let Err(e) = run(opt) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run(opt: Opt) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = match &opt.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(mempool) = opt.mempool {
        settings = settings.with_mempool_path(mempool);
    }
    if let Some(output) = opt.output {
        settings = settings.with_output_path(output);
    }

    let summary = pipeline::run(&settings)?;
    info!(
        "{} of {} transactions included ({} rejected), block size {} bytes",
        summary.transaction_count - 1,
        summary.loaded,
        summary.rejected,
        summary.block_size
    );
    println!("Block data written to {}", summary.output_path.display());
    Ok(())
}
