// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Campaign model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lifecycle status of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Closed,
}

/// A time-bounded fundraising campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: u64,
    pub name: String,
    /// First day of the campaign (inclusive)
    pub period_start: NaiveDate,
    /// Last day of the campaign (inclusive)
    pub period_finish: NaiveDate,
    #[serde(default)]
    pub status: CampaignStatus,
    /// Fundraising goal, if any
    #[serde(default)]
    pub goal: Option<Decimal>,
    /// Currency per km, used when the current rule leaves its rate unset
    #[serde(default)]
    pub base_rate: Decimal,
    /// Display metadata, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_identity: Option<serde_json::Value>,
}

impl Campaign {
    /// Check the campaign-level invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.period_start > self.period_finish {
            return Err(ValidationError::InvalidPeriod {
                campaign_id: self.id,
                start: self.period_start,
                finish: self.period_finish,
            });
        }
        if self.base_rate < Decimal::ZERO {
            return Err(ValidationError::NegativeRate(self.base_rate));
        }
        if let Some(goal) = self.goal {
            if goal < Decimal::ZERO {
                return Err(ValidationError::NegativeGoal(goal));
            }
        }
        Ok(())
    }

    /// Whether a calendar day falls inside the campaign period.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.period_start <= day && day <= self.period_finish
    }
}
