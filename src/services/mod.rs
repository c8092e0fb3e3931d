// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the campaign rules and allocation engine.

pub mod aggregator;
pub mod allocation;
pub mod audit;
pub mod cache;
pub mod caps;
pub mod converter;
pub mod pipeline;
pub mod plausibility;

pub use aggregator::{project, Projection, ValidatedEntry};
pub use allocation::{allocate, validate_shares};
pub use cache::ProjectionCache;
pub use caps::{apply_athlete_cap, apply_sponsor_cap, CapOutcome};
pub use converter::convert;
pub use pipeline::evaluate_campaign;
pub use plausibility::{classify, PlausibilityPolicy};
