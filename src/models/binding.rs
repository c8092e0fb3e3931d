// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sponsor and NGO bindings of a campaign.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A company sponsoring a campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorBinding {
    pub campaign_id: u64,
    pub sponsor_id: u64,
    /// Sponsorship tier label (e.g. "gold")
    #[serde(default)]
    pub tier: Option<String>,
    /// Ceiling on this sponsor's realized contribution
    #[serde(default)]
    pub cap: Option<Decimal>,
    /// Logo display order (lower first)
    #[serde(default)]
    pub display_order: Option<u32>,
}

/// A beneficiary NGO's share of a campaign's funds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NgoAllocation {
    pub campaign_id: u64,
    pub ngo_id: u64,
    /// Percentage share (0..=100)
    pub pct: Decimal,
}
