// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pacefund engine runner
//!
//! Reads an input snapshot exported by the persistence layer, evaluates every
//! campaign and writes the JSON report.

use pacefund::{
    config::Config,
    error::{EngineError, Result},
    evaluate_concurrently,
    models::EngineInput,
    time_utils::format_utc_rfc3339,
    Engine,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize structured JSON logging
    init_logging();

    if let Err(err) = run().await {
        let body = err.to_response();
        match serde_json::to_string(&body) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{err}"),
        }
        std::process::exit(err.exit_code());
    }
}

async fn run() -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(path) = std::env::args().nth(1) {
        config.input_path = Some(PathBuf::from(path));
    }
    let input_path = config.require_input()?.clone();

    tracing::info!(
        path = %input_path.display(),
        top_athletes = config.top_athletes,
        started_at = %format_utc_rfc3339(chrono::Utc::now()),
        "Starting evaluation"
    );

    let raw = tokio::fs::read_to_string(&input_path)
        .await
        .map_err(|e| EngineError::Input(format!("{}: {}", input_path.display(), e)))?;
    let snapshot: EngineInput = serde_json::from_str(&raw)
        .map_err(|e| EngineError::Input(format!("{}: {}", input_path.display(), e)))?;

    tracing::info!(
        campaigns = snapshot.campaigns.len(),
        activities = snapshot.activities.len(),
        "Snapshot loaded"
    );

    let output_path = config.output_path.clone();
    let engine = Arc::new(Engine::new(config));
    let report = evaluate_concurrently(engine, &snapshot).await?;

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| EngineError::Internal(anyhow::anyhow!("Failed to encode report: {}", e)))?;

    match output_path {
        Some(path) => {
            tokio::fs::write(&path, json).await.map_err(|e| {
                EngineError::Internal(anyhow::anyhow!("{}: {}", path.display(), e))
            })?;
            tracing::info!(path = %path.display(), digest = %report.digest, "Report written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "pacefund=debug".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    let filter = match "info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    tracing_subscriber::registry().with(filter).with(format).init();
}
