// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Pacefund: turn athletes' distance into campaign donations
//!
//! This crate provides the campaign rules and allocation engine: it validates
//! raw activities against plausibility rules, converts validated distance into
//! money under capped, versioned campaign rules, splits realized funds across
//! NGOs and rolls everything up into campaign and global statistics.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use std::sync::Arc;

use config::Config;
use error::{EngineError, Result};
use models::{CampaignInput, CampaignReport, EngineInput, EngineReport, GlobalReport};
use services::aggregator::{project, ValidatedEntry};
use services::audit::sha256_json;
use services::pipeline::{evaluate_campaign, validated_entries};
use services::ProjectionCache;

/// Shared engine state.
#[derive(Debug, Default)]
pub struct Engine {
    pub config: Config,
    pub cache: ProjectionCache,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cache: ProjectionCache::new(),
        }
    }

    /// Evaluate one campaign, going through the cache when enabled.
    pub fn evaluate_campaign(&self, input: &CampaignInput) -> Result<Arc<CampaignReport>> {
        let top_n = self.config.top_athletes;
        let compute = || evaluate_campaign(input, top_n).map_err(EngineError::from);
        if self.config.cache_enabled {
            self.cache.get_or_compute(input, top_n, compute)
        } else {
            compute().map(Arc::new)
        }
    }

    /// Evaluate every campaign of a snapshot sequentially.
    pub fn evaluate(&self, snapshot: &EngineInput) -> Result<EngineReport> {
        let reports = snapshot
            .partition()
            .iter()
            .map(|input| self.evaluate_campaign(input))
            .collect::<Result<Vec<_>>>()?;
        self.assemble(reports)
    }

    /// Build the global rollup and audit digest from campaign reports.
    ///
    /// Reports must be in ascending campaign id order.
    pub fn assemble(&self, reports: Vec<Arc<CampaignReport>>) -> Result<EngineReport> {
        let entries: Vec<ValidatedEntry> = reports
            .iter()
            .flat_map(|r| validated_entries(r))
            .collect();
        let projection = project(&entries, self.config.top_athletes)?;
        let global = GlobalReport {
            summary: projection.summary,
            daily: projection.daily,
            top_athletes: projection.top_athletes,
        };

        let campaigns: Vec<CampaignReport> = reports.iter().map(|r| (**r).clone()).collect();
        let digest = sha256_json(&(&campaigns, &global)).map_err(|e| {
            EngineError::Internal(anyhow::anyhow!("Failed to digest report: {}", e))
        })?;

        Ok(EngineReport {
            campaigns,
            global,
            digest,
        })
    }
}

/// Evaluate campaigns in parallel on the blocking pool.
///
/// Campaigns share no state, so each runs independently; the result is
/// identical to [`Engine::evaluate`].
pub async fn evaluate_concurrently(
    engine: Arc<Engine>,
    snapshot: &EngineInput,
) -> Result<EngineReport> {
    let handles = snapshot.partition().into_iter().map(|input| {
        let engine = engine.clone();
        async move {
            let campaign_id = input.campaign.id;
            tokio::task::spawn_blocking(move || engine.evaluate_campaign(&input))
                .await
                .map_err(|e| {
                    EngineError::Internal(anyhow::anyhow!(
                        "Evaluation task for campaign {} failed: {}",
                        campaign_id,
                        e
                    ))
                })?
        }
    });

    let reports = futures_util::future::try_join_all(handles).await?;
    engine.assemble(reports)
}
