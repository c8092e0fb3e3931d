// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Roll validated activities up into summaries, daily series and
//! leaderboards.
//!
//! Only activities that passed validation are fed in; rejected ones never
//! show up here, not even as zeros.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::models::{AthleteTotals, CampaignSummary, DailyPoint};

/// A validated activity with its realized value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEntry {
    pub athlete_id: String,
    pub day: NaiveDate,
    pub distance_m: f64,
    pub value: Decimal,
}

/// Summary, daily series and leaderboard for one scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub summary: CampaignSummary,
    pub daily: Vec<DailyPoint>,
    pub top_athletes: Vec<AthleteTotals>,
    /// Every athlete, ordered by athlete id
    pub athletes: Vec<AthleteTotals>,
}

/// Compute all projections for a scope.
pub fn project<'a>(
    entries: impl IntoIterator<Item = &'a ValidatedEntry> + Clone,
    top_n: usize,
) -> Result<Projection, ValidationError> {
    let athletes = athlete_totals(entries.clone())?;
    Ok(Projection {
        summary: summarize(&athletes)?,
        daily: daily_series(entries),
        top_athletes: top_athletes(&athletes, top_n),
        athletes,
    })
}

/// Per-athlete totals, ordered by athlete id.
pub fn athlete_totals<'a>(
    entries: impl IntoIterator<Item = &'a ValidatedEntry>,
) -> Result<Vec<AthleteTotals>, ValidationError> {
    let mut by_athlete: BTreeMap<&str, (f64, Decimal)> = BTreeMap::new();
    for entry in entries {
        let totals = by_athlete
            .entry(entry.athlete_id.as_str())
            .or_insert((0.0, Decimal::ZERO));
        totals.0 += entry.distance_m;
        totals.1 = totals
            .1
            .checked_add(entry.value)
            .ok_or(ValidationError::AmountOverflow("athlete total"))?;
    }

    Ok(by_athlete
        .into_iter()
        .map(|(athlete_id, (distance, value))| AthleteTotals {
            athlete_id: athlete_id.to_string(),
            total_distance_m: distance,
            total_value: value,
        })
        .collect())
}

/// Headline numbers over per-athlete totals.
pub fn summarize(athletes: &[AthleteTotals]) -> Result<CampaignSummary, ValidationError> {
    let total_distance_m: f64 = athletes.iter().map(|a| a.total_distance_m).sum();
    let total_value = athletes
        .iter()
        .try_fold(Decimal::ZERO, |acc, a| acc.checked_add(a.total_value))
        .ok_or(ValidationError::AmountOverflow("scope total"))?;
    let athlete_count = athletes.len() as u32;
    let avg_km_per_athlete = if athlete_count > 0 {
        (total_distance_m / 1000.0) / athlete_count as f64
    } else {
        0.0
    };

    Ok(CampaignSummary {
        total_distance_m,
        total_value,
        athlete_count,
        avg_km_per_athlete,
    })
}

/// Kilometers per UTC day, ascending; days without activity are omitted.
pub fn daily_series<'a>(
    entries: impl IntoIterator<Item = &'a ValidatedEntry>,
) -> Vec<DailyPoint> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for entry in entries {
        *by_day.entry(entry.day).or_insert(0.0) += entry.distance_m;
    }

    by_day
        .into_iter()
        .map(|(day, meters)| DailyPoint {
            day,
            km: meters / 1000.0,
        })
        .collect()
}

/// Leaderboard: value desc, then distance desc, then athlete id asc.
pub fn top_athletes(athletes: &[AthleteTotals], top_n: usize) -> Vec<AthleteTotals> {
    let mut ranked = athletes.to_vec();
    ranked.sort_by(|a, b| {
        b.total_value
            .cmp(&a.total_value)
            .then_with(|| {
                b.total_distance_m
                    .partial_cmp(&a.total_distance_m)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.athlete_id.cmp(&b.athlete_id))
    });
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(athlete: &str, day: &str, distance_m: f64, value: Decimal) -> ValidatedEntry {
        ValidatedEntry {
            athlete_id: athlete.to_string(),
            day: day.parse().unwrap(),
            distance_m,
            value,
        }
    }

    #[test]
    fn test_daily_series_omits_empty_days() {
        let entries = vec![
            entry("a", "2025-01-03", 3000.0, dec!(1.50)),
            entry("b", "2025-01-01", 5000.0, dec!(2.50)),
        ];
        let daily = daily_series(&entries);
        assert_eq!(
            daily,
            vec![
                DailyPoint {
                    day: "2025-01-01".parse().unwrap(),
                    km: 5.0
                },
                DailyPoint {
                    day: "2025-01-03".parse().unwrap(),
                    km: 3.0
                },
            ]
        );
    }

    #[test]
    fn test_summary() {
        let entries = vec![
            entry("a", "2025-01-01", 4000.0, dec!(2.00)),
            entry("a", "2025-01-02", 6000.0, dec!(3.00)),
            entry("b", "2025-01-02", 2000.0, dec!(1.00)),
        ];
        let projection = project(&entries, 10).unwrap();
        assert_eq!(projection.summary.total_distance_m, 12_000.0);
        assert_eq!(projection.summary.total_value, dec!(6.00));
        assert_eq!(projection.summary.athlete_count, 2);
        assert_eq!(projection.summary.avg_km_per_athlete, 6.0);
        assert_eq!(projection.athletes.len(), 2);
    }

    #[test]
    fn test_empty_scope() {
        let projection = project(&Vec::<ValidatedEntry>::new(), 10).unwrap();
        assert_eq!(projection.summary.athlete_count, 0);
        assert_eq!(projection.summary.avg_km_per_athlete, 0.0);
        assert!(projection.daily.is_empty());
        assert!(projection.top_athletes.is_empty());
    }

    #[test]
    fn test_value_overflow_reported() {
        let entries = vec![
            entry("a", "2025-01-01", 1000.0, Decimal::MAX),
            entry("a", "2025-01-02", 1000.0, dec!(1)),
        ];
        assert_eq!(
            athlete_totals(&entries),
            Err(ValidationError::AmountOverflow("athlete total"))
        );

        let entries = vec![
            entry("a", "2025-01-01", 1000.0, Decimal::MAX),
            entry("b", "2025-01-01", 1000.0, Decimal::MAX),
        ];
        assert_eq!(
            project(&entries, 10),
            Err(ValidationError::AmountOverflow("scope total"))
        );
    }

    #[test]
    fn test_leaderboard_tie_breaks() {
        let athletes = vec![
            AthleteTotals {
                athlete_id: "carol".to_string(),
                total_distance_m: 5000.0,
                total_value: dec!(10),
            },
            AthleteTotals {
                athlete_id: "bob".to_string(),
                total_distance_m: 9000.0,
                total_value: dec!(10),
            },
            AthleteTotals {
                athlete_id: "alice".to_string(),
                total_distance_m: 5000.0,
                total_value: dec!(10),
            },
            AthleteTotals {
                athlete_id: "dave".to_string(),
                total_distance_m: 1.0,
                total_value: dec!(20),
            },
        ];
        let ranked: Vec<String> = top_athletes(&athletes, 10)
            .into_iter()
            .map(|a| a.athlete_id)
            .collect();
        assert_eq!(ranked, vec!["dave", "bob", "alice", "carol"]);
    }

    #[test]
    fn test_leaderboard_bounded() {
        let athletes: Vec<AthleteTotals> = (0..25)
            .map(|i| AthleteTotals {
                athlete_id: format!("athlete-{i:02}"),
                total_distance_m: 1000.0,
                total_value: Decimal::from(i),
            })
            .collect();
        let top = top_athletes(&athletes, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].athlete_id, "athlete-24");
        assert_eq!(top[9].athlete_id, "athlete-15");
    }
}
