// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Memoized campaign reports.
//!
//! Reports are keyed by campaign id and tagged with a fingerprint of every
//! input that fed them. Any input change yields a new fingerprint, so a stale
//! report is never served.

use dashmap::DashMap;
use std::sync::Arc;

use crate::error::{EngineError, Result};
use crate::models::{CampaignInput, CampaignReport};
use crate::services::audit::sha256_json;

#[derive(Debug, Clone)]
struct CachedReport {
    fingerprint: String,
    report: Arc<CampaignReport>,
}

/// Concurrent cache of campaign reports.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    entries: DashMap<u64, CachedReport>,
}

/// Fingerprint of a campaign's inputs and the evaluation parameters.
pub fn fingerprint(input: &CampaignInput, top_n: usize) -> Result<String> {
    sha256_json(&(input, top_n))
        .map_err(|e| EngineError::Internal(anyhow::anyhow!("Failed to fingerprint input: {}", e)))
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached report when the fingerprint matches, otherwise
    /// compute, store and return a fresh one.
    pub fn get_or_compute<F>(
        &self,
        input: &CampaignInput,
        top_n: usize,
        compute: F,
    ) -> Result<Arc<CampaignReport>>
    where
        F: FnOnce() -> Result<CampaignReport>,
    {
        let campaign_id = input.campaign.id;
        let key = fingerprint(input, top_n)?;

        if let Some(cached) = self.entries.get(&campaign_id) {
            if cached.fingerprint == key {
                tracing::debug!(campaign_id, "Projection cache hit");
                return Ok(cached.report.clone());
            }
        }

        let report = Arc::new(compute()?);
        self.entries.insert(
            campaign_id,
            CachedReport {
                fingerprint: key,
                report: report.clone(),
            },
        );
        Ok(report)
    }

    /// Drop a campaign's cached report.
    pub fn invalidate(&self, campaign_id: u64) {
        self.entries.remove(&campaign_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
