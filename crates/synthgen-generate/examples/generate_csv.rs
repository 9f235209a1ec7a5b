use std::env;
use std::io;

use serde_json::json;
use synthgen_generate::{GeneratorConfig, SyntheticGenerator, write_dataset_csv};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let mut rows = 10_usize;
    let mut config = GeneratorConfig::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--rows" => rows = args.next().ok_or("missing --rows value")?.parse()?,
            "--seed" => config.seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            "--edge-cases" => config.inject_edge_cases = true,
            "--noise" => config.inject_noise = true,
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }

    let raw = json!({
        "fields": {
            "customer_id": {"type": "uuid"},
            "name": {"type": "name"},
            "email": {"type": "email"},
            "age": {"type": "age", "min": 18, "max": 80},
            "credit_score": {"type": "credit_score", "min": 300, "max": 850},
            "balance": {"type": "account_balance", "min": -500, "max": 25000, "precision": 2},
            "currency": {"type": "currency"},
            "segment": {"type": "choice", "options": ["retail", "premium", "private"]},
            "order_date": {"type": "date", "start": "2024-01-01", "end": "2024-06-30"},
            "shipping_date": {"type": "date", "start": "2024-01-01", "end": "2024-07-31"}
        }
    });

    let mut generator = SyntheticGenerator::new(config);
    if !generator.validate_schema(&raw) {
        return Err("schema failed validation".into());
    }
    let schema = generator.load_schema(&raw)?;
    let outcome = generator.generate(&schema, rows)?;

    write_dataset_csv(io::stdout().lock(), &outcome.dataset)?;
    eprintln!(
        "rows={} rows_with_issues={}",
        outcome.report.rows_generated,
        outcome.report.consistency_issues.len()
    );
    Ok(())
}
