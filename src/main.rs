use clap::Parser;
use sparse_rowscan::config::{Cli, Settings};
use sparse_rowscan::matrix::generate;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::resolve(Cli::parse())?;
    let g = &settings.generator;
    info!(
        "Testing a {} x {} matrix with a density of {}",
        g.nrow, g.ncol, g.density
    );

    let matrix = generate(g)?;
    let report = sparse_rowscan::bench::run(&matrix, &settings.strategies);

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    if settings.strict {
        report.verify()?;
    }
    Ok(())
}
