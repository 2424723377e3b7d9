use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use log::{info, warn};

use epi_census::{
    census, isolation, reconcile, report, IsolationSet, IsolationSource, ReconcilerConfig,
    SheetSource,
};

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("epi-census")
        .about("Reconcile a hospital census export with the active isolation list")
        .arg(
            Arg::new("census")
                .help("Path to the census HTML export")
                .required(true),
        )
        .arg(
            Arg::new("isolation-url")
                .long("isolation-url")
                .help("Retrieval address of the published isolation sheet (CSV)"),
        )
        .arg(
            Arg::new("isolation-csv")
                .long("isolation-csv")
                .help("Path to a local isolation sheet CSV (overrides the URL)"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the reconciled record set as JSON to this path"),
        )
        .get_matches();

    let config = ReconcilerConfig::default();
    let start = Instant::now();

    let census_path = matches
        .get_one::<String>("census")
        .context("census path argument is required")?;
    let html = fs::read_to_string(census_path)
        .with_context(|| format!("failed to read census export {census_path}"))?;
    let patients = census::extract(&html)?;
    info!("extracted {} census patients from {census_path}", patients.len());

    let isolation_set = load_isolations(&matches, &config)?;
    if isolation_set.degraded {
        warn!("isolation data unavailable; the run reflects the census side only");
    } else {
        info!("{} active isolations", isolation_set.records.len());
    }

    let outcome = reconcile::reconcile(&patients, &isolation_set.records, &config);
    info!(
        "reconciled {} records in {:?}: {} complete, {} needing review",
        outcome.len(),
        start.elapsed(),
        outcome.complete.len(),
        outcome.review.len()
    );

    for bucket in report::unit_buckets(&outcome.complete) {
        info!("unit {}: {} patients", bucket.unit, bucket.records.len());
    }

    let records: Vec<_> = outcome
        .complete
        .iter()
        .chain(outcome.review.iter())
        .collect();
    let json = serde_json::to_string_pretty(&records)?;
    match matches.get_one::<String>("output") {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write {path}"))?;
            info!("wrote reconciled record set to {path}");
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Load the isolation side from whichever source was configured
///
/// A local CSV is read directly and its structural errors are blocking; a
/// URL goes through the degrading fetch boundary. With no source at all
/// the isolation side is treated as unavailable, not as empty.
fn load_isolations(matches: &clap::ArgMatches, config: &ReconcilerConfig) -> Result<IsolationSet> {
    if let Some(path) = matches.get_one::<String>("isolation-csv") {
        let body = fs::read_to_string(path)
            .with_context(|| format!("failed to read isolation sheet {path}"))?;
        let rows = isolation::source::parse_csv_rows(&body)?;
        let records = isolation::normalize(&rows, config.consolidation)?;
        return Ok(IsolationSet {
            records,
            degraded: false,
        });
    }

    if let Some(url) = matches.get_one::<String>("isolation-url") {
        let source = IsolationSource::new(url.clone(), config.fetch_timeout)?;
        return Ok(source.load_active(config.consolidation)?);
    }

    Ok(IsolationSet {
        records: Vec::new(),
        degraded: true,
    })
}
