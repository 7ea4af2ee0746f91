//! Load a model, simulate it, and print selected channels as CSV.
//!
//! Requires `HOPSANHOME` to point at a Hopsan installation.
//!
//! Run with:
//!   cargo run --example run_model -- model.hmf Volume.P1.p Mass.P2.x
//!
//! Set `RUST_LOG=hopsan=trace` to see every engine call.

use hopsan::{Hopsan, SimulationSettings};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let model = args
        .next()
        .ok_or("usage: run_model <model.hmf> [channel...]")?;
    let channels: Vec<String> = args.collect();

    let mut hopsan = Hopsan::new()?;
    hopsan.load_model(&model)?;
    hopsan.apply_settings(&SimulationSettings::span(0.0, 10.0).with_log_samples(1000));
    hopsan.simulate();

    let time = hopsan.time_vector()?;
    let columns = channels
        .iter()
        .map(|name| hopsan.data_vector(name))
        .collect::<Result<Vec<_>, _>>()?;

    println!("time,{}", channels.join(","));
    for (i, t) in time.iter().enumerate() {
        let row: Vec<String> = columns
            .iter()
            .map(|c| c.get(i).map(f64::to_string).unwrap_or_default())
            .collect();
        println!("{t},{}", row.join(","));
    }
    Ok(())
}
