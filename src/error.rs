// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Engine error types with consistent JSON error bodies.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::ConfigError;

/// Input-contract violations. Always surfaced, never silently corrected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("activity {activity_id}: distance must be a non-negative number, got {distance_m}")]
    InvalidDistance { activity_id: u64, distance_m: f64 },

    #[error("activity {activity_id}: duration must be a non-negative number, got {duration_s}")]
    InvalidDuration { activity_id: u64, duration_s: f64 },

    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("cap must be non-negative, got {0}")]
    NegativeCap(Decimal),

    #[error("total funds must be non-negative with at most 2 decimal places, got {0}")]
    InvalidTotal(Decimal),

    #[error("allocation percentages sum to {actual}, expected 100")]
    AllocationSum { actual: Decimal },

    #[error("NGO {ngo_id}: allocation percentage must be within 0..=100, got {pct}")]
    InvalidShare { ngo_id: u64, pct: Decimal },

    #[error("NGO {0} appears more than once in the allocation set")]
    DuplicateNgo(u64),

    #[error("unparseable exclusion predicate: {0}")]
    InvalidExclusions(String),

    #[error("campaign {campaign_id} has no current rule")]
    NoCurrentRule { campaign_id: u64 },

    #[error("campaign {campaign_id} has more than one rule with version {version}")]
    DuplicateRuleVersion { campaign_id: u64, version: u32 },

    #[error("campaign {campaign_id} rule v{version} is invalid: {details}")]
    InvalidRule {
        campaign_id: u64,
        version: u32,
        details: String,
    },

    #[error("campaign {campaign_id}: period start {start} is after finish {finish}")]
    InvalidPeriod {
        campaign_id: u64,
        start: NaiveDate,
        finish: NaiveDate,
    },

    #[error("conversion rate must be non-negative, got {0}")]
    NegativeRate(Decimal),

    #[error("fundraising goal must be non-negative, got {0}")]
    NegativeGoal(Decimal),

    #[error("monetary amount overflowed while computing {0}")]
    AmountOverflow(&'static str),
}

impl ValidationError {
    /// Stable snake_case code of the violated invariant.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidDistance { .. } => "invalid_distance",
            ValidationError::InvalidDuration { .. } => "invalid_duration",
            ValidationError::NegativeAmount(_) => "negative_amount",
            ValidationError::NegativeCap(_) => "negative_cap",
            ValidationError::InvalidTotal(_) => "invalid_total",
            ValidationError::AllocationSum { .. } => "allocation_sum",
            ValidationError::InvalidShare { .. } => "invalid_share",
            ValidationError::DuplicateNgo(_) => "duplicate_ngo",
            ValidationError::InvalidExclusions(_) => "invalid_exclusions",
            ValidationError::NoCurrentRule { .. } => "no_current_rule",
            ValidationError::DuplicateRuleVersion { .. } => "duplicate_rule_version",
            ValidationError::InvalidRule { .. } => "invalid_rule",
            ValidationError::InvalidPeriod { .. } => "invalid_period",
            ValidationError::NegativeRate(_) => "negative_rate",
            ValidationError::NegativeGoal(_) => "negative_goal",
            ValidationError::AmountOverflow(_) => "amount_overflow",
        }
    }
}

/// Top-level engine error.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl EngineError {
    /// Map to the JSON body reported to callers.
    pub fn to_response(&self) -> ErrorResponse {
        let (error, details) = match self {
            EngineError::Validation(e) => (e.code(), Some(e.to_string())),
            EngineError::Config(e) => ("config_error", Some(e.to_string())),
            EngineError::Input(msg) => ("invalid_input", Some(msg.clone())),
            EngineError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                ("internal_error", None)
            }
        };

        ErrorResponse {
            error: error.to_string(),
            details,
        }
    }

    /// Process exit status for the binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::Validation(_) => 2,
            _ => 1,
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
