// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Input snapshot handed over by the persistence layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{Activity, Campaign, CampaignRule, NgoAllocation, SponsorBinding};

/// All records needed for one engine run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineInput {
    /// Point in time used to pick the current rule version
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub rules: Vec<CampaignRule>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub sponsors: Vec<SponsorBinding>,
    #[serde(default)]
    pub ngos: Vec<NgoAllocation>,
}

/// The slice of a snapshot that belongs to one campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignInput {
    pub as_of: Option<DateTime<Utc>>,
    pub campaign: Campaign,
    pub rules: Vec<CampaignRule>,
    pub activities: Vec<Activity>,
    pub sponsors: Vec<SponsorBinding>,
    pub ngos: Vec<NgoAllocation>,
}

impl EngineInput {
    /// Split the snapshot per campaign, in ascending campaign id order.
    ///
    /// Records referencing a campaign not present in the snapshot are dropped
    /// with a warning.
    pub fn partition(&self) -> Vec<CampaignInput> {
        let known: BTreeSet<u64> = self.campaigns.iter().map(|c| c.id).collect();
        let orphans = self
            .activities
            .iter()
            .filter(|a| !known.contains(&a.campaign_id))
            .count();
        if orphans > 0 {
            tracing::warn!(
                count = orphans,
                "Activities reference campaigns missing from the snapshot"
            );
        }

        let mut campaigns: Vec<&Campaign> = self.campaigns.iter().collect();
        campaigns.sort_by_key(|c| c.id);

        campaigns
            .into_iter()
            .map(|campaign| {
                let id = campaign.id;
                CampaignInput {
                    as_of: self.as_of,
                    campaign: campaign.clone(),
                    rules: self
                        .rules
                        .iter()
                        .filter(|r| r.campaign_id == id)
                        .cloned()
                        .collect(),
                    activities: self
                        .activities
                        .iter()
                        .filter(|a| a.campaign_id == id)
                        .cloned()
                        .collect(),
                    sponsors: self
                        .sponsors
                        .iter()
                        .filter(|s| s.campaign_id == id)
                        .cloned()
                        .collect(),
                    ngos: self
                        .ngos
                        .iter()
                        .filter(|n| n.campaign_id == id)
                        .cloned()
                        .collect(),
                }
            })
            .collect()
    }
}
