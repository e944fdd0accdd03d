//! Basic interlace usage: sparse and dense alignment plus day break
//!
//! This example demonstrates:
//! - Registering series parsed from JSON
//! - Sparse alignment over observed timestamps
//! - Dense alignment over every second in range
//! - Splitting an aligned table into per-day buckets
//!
//! Run with: RUST_LOG=debug cargo run --example basic_usage

use interlace::partition::{TruncateSuffix, UnixDay};
use interlace::record::records_from_str;
use interlace::{Aligner, FillPolicy, SeriesSet, SparseGaps};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Interlace Basic Usage Example ===\n");

    // Two sensors reporting at their own pace (Unix seconds)
    let mut sensors = SeriesSet::new();
    sensors.insert(
        "temperature",
        records_from_str(
            r#"[
                {"ts": 1704153595, "value": 20.5},
                {"ts": 1704153600, "value": 21.0},
                {"ts": 1704153604, "value": 21.4}
            ]"#,
        )?,
    );
    sensors.insert(
        "humidity",
        records_from_str(
            r#"[
                {"ts": 1704153597, "value": 48},
                {"ts": 1704153603, "value": 47}
            ]"#,
        )?,
    );

    let aligner = Aligner::builder(sensors)
        .fill(FillPolicy::Null)
        .sparse_gaps(SparseGaps::Omit)
        .build()?;

    let range = aligner.key_range("ts")?;
    println!("Key range: {} ..= {}\n", range.first, range.last);

    println!("Sparse alignment (observed keys only):");
    let sparse = aligner.generate("ts", "value")?;
    for (key, row) in &sparse {
        println!("  {key}: {}", serde_json::to_string(row)?);
    }

    println!("\nDense alignment (every second):");
    let dense = aligner.generate_and_fill("ts", "value")?;
    for (key, row) in &dense {
        println!("  {key}: {}", serde_json::to_string(row)?);
    }
    println!("  ✓ {} rows for {} series\n", dense.len(), aligner.series().len());

    println!("Day break (Unix seconds -> UTC date):");
    for (day, bucket) in dense.day_break(&UnixDay)? {
        println!("  {day}: {} rows", bucket.len());
    }

    // Fixed-layout timestamp strings
    let mut log = SeriesSet::new();
    log.insert(
        "door",
        records_from_str(
            r#"[
                {"at": "2024-01-01 10:00:00", "state": "open"},
                {"at": "2024-01-02 09:00:00", "state": "closed"}
            ]"#,
        )?,
    );
    let table = Aligner::new(log).generate("at", "state")?;

    println!("\nDay break (\"YYYY-MM-DD HH:MM:SS\" keys):");
    for (day, bucket) in table.day_break(&TruncateSuffix::TIME_OF_DAY)? {
        println!("  {day}: {}", serde_json::to_string(&bucket)?);
    }

    Ok(())
}
