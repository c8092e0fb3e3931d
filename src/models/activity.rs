// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model and classification outcomes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Raw activity record supplied by the ingestion layer. Never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Ingestion ID (stable tie-break for processing order)
    pub id: u64,
    pub athlete_id: String,
    pub campaign_id: u64,
    pub started_at: DateTime<Utc>,
    /// Distance in meters
    pub distance_m: f64,
    /// Elapsed time in seconds
    pub duration_s: f64,
    /// Data source (e.g. "strava", "manual")
    #[serde(default)]
    pub source: String,
}

impl Activity {
    /// Check the input contract: finite, non-negative distance and duration.
    pub fn check(&self) -> Result<(), ValidationError> {
        if !self.distance_m.is_finite() || self.distance_m < 0.0 {
            return Err(ValidationError::InvalidDistance {
                activity_id: self.id,
                distance_m: self.distance_m,
            });
        }
        if !self.duration_s.is_finite() || self.duration_s < 0.0 {
            return Err(ValidationError::InvalidDuration {
                activity_id: self.id,
                duration_s: self.duration_s,
            });
        }
        Ok(())
    }

    /// UTC calendar day of the start timestamp.
    pub fn day(&self) -> NaiveDate {
        self.started_at.date_naive()
    }

    /// Average speed in km/h, if duration is positive.
    pub fn avg_speed_kmh(&self) -> Option<f64> {
        (self.duration_s > 0.0).then(|| (self.distance_m / 1000.0) / (self.duration_s / 3600.0))
    }

    /// Pace in seconds per km, if distance is positive.
    pub fn pace_s_per_km(&self) -> Option<f64> {
        (self.distance_m > 0.0).then(|| self.duration_s / (self.distance_m / 1000.0))
    }
}

/// Why an activity did not count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum RejectionReason {
    /// Started outside the campaign period
    OutsideCampaignPeriod { day: NaiveDate },
    TooShort { duration_s: f64, min_duration_s: f64 },
    TooFast { speed_kmh: f64, max_avg_speed_kmh: f64 },
    PaceTooFast { pace_s_per_km: f64, min_pace_s_per_km: f64 },
    ExcludedSource { source: String },
    ExcludedAthlete { athlete_id: String },
    BelowMinDistance { distance_m: f64, min_distance_m: f64 },
    /// Zero distance or zero duration
    ZeroDistanceOrDuration,
}

/// Classification of one activity. Derived, never stored on the activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Classification {
    Valid,
    Rejected { reason: RejectionReason },
}

impl Classification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Classification::Valid)
    }
}
