mod cli;


use crate::cli::CLI;
use anyhow::Context;
use arrow::array::Array;
use clap::Parser;
use sqd_fixed_binary::json::encode;
use sqd_fixed_binary::memory::TrackingAllocator;
use tracing::{error, info};


fn main() -> anyhow::Result<()> {
    let args = CLI::parse();

    let env_filter = tracing_subscriber::EnvFilter::builder().parse_lossy(
        std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV)
            .unwrap_or("info".to_string()),
    );

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();

    let options = args.builder_options()?;
    let data = std::fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input))?;

    let allocator = TrackingAllocator::new();
    let mut builder = options.build_with_allocator(allocator.clone());

    if let Err(err) = builder.decode_json(&data) {
        error!(
            error = ?err,
            decoded_items = builder.len(),
            "failed to decode {}",
            args.input
        );
        return Err(err)
    }

    let array = builder.finish();

    info!(
        len = array.len(),
        null_count = array.null_count(),
        byte_width = array.value_length(),
        allocations = allocator.allocations(),
        reallocations = allocator.reallocations(),
        allocated_bytes = allocator.allocated_bytes(),
        "decoded fixed size binary array"
    );

    if args.encode {
        println!("{}", encode(&array)?);
    }

    Ok(())
}
