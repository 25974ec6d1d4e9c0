//! Generate one treatment course and print it as JSON.
//!
//! Usage:
//!   MERIDIAN_BODY_PART=shoulder \
//!   MERIDIAN_SEVERITY=moderate_to_severe \
//!   MERIDIAN_START_PAIN=8 \
//!   MERIDIAN_TX_COUNT=20 \
//!   MERIDIAN_SEED=42 \
//!   MERIDIAN_CONFIG=engine.json \
//!   cargo run -p meridian-engine --example generate_course
//!
//! Every variable is optional. Logs go to stderr; `RUST_LOG` overrides the
//! default `info` filter.

use meridian_core::models::clinical::{BodyPart, Chronicity, SeverityLevel};
use meridian_core::models::request::GenerationRequest;
use meridian_engine::config::EngineConfig;
use meridian_engine::{generate_course, Collaborators};
use tracing_subscriber::EnvFilter;

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let body_part: BodyPart = var_or("MERIDIAN_BODY_PART", "shoulder").parse()?;
    let severity: SeverityLevel = var_or("MERIDIAN_SEVERITY", "moderate_to_severe").parse()?;
    let chronicity: Chronicity = var_or("MERIDIAN_CHRONICITY", "acute").parse()?;
    let start_pain: f64 = var_or("MERIDIAN_START_PAIN", "8").parse()?;
    let tx_count: u32 = var_or("MERIDIAN_TX_COUNT", "20").parse()?;

    let mut request = GenerationRequest::new(body_part, severity, start_pain, tx_count)
        .with_chronicity(chronicity);
    if let Ok(seed) = std::env::var("MERIDIAN_SEED") {
        request = request.with_seed(seed.parse()?);
    }

    let config = match std::env::var("MERIDIAN_CONFIG") {
        Ok(path) => EngineConfig::load(path)?,
        Err(_) => EngineConfig::default(),
    };

    let result = generate_course(&request, &Collaborators::default(), &config)?;
    eprintln!(
        "seed {} produced {} visits using {} draws",
        result.used_seed,
        result.states.len(),
        result.draws
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
