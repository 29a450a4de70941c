// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Budget tiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Budget classification controlling fill ratio and room scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Low => "low",
            BudgetTier::Medium => "medium",
            BudgetTier::High => "high",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper budget bounds (inclusive) of the low and medium tiers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierThresholds {
    pub low_max: f64,
    pub medium_max: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            low_max: 200_000.0,
            medium_max: 700_000.0,
        }
    }
}

impl TierThresholds {
    pub fn classify(&self, budget: f64) -> BudgetTier {
        if budget <= self.low_max {
            BudgetTier::Low
        } else if budget <= self.medium_max {
            BudgetTier::Medium
        } else {
            BudgetTier::High
        }
    }
}

/// Classify a raw budget with the default thresholds
pub fn classify_budget(budget: f64) -> BudgetTier {
    TierThresholds::default().classify(budget)
}

/// One value per budget tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierTable<T> {
    pub low: T,
    pub medium: T,
    pub high: T,
}

impl<T> TierTable<T> {
    pub fn new(low: T, medium: T, high: T) -> Self {
        Self { low, medium, high }
    }

    pub fn get(&self, tier: BudgetTier) -> &T {
        match tier {
            BudgetTier::Low => &self.low,
            BudgetTier::Medium => &self.medium,
            BudgetTier::High => &self.high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        assert_eq!(classify_budget(150_000.0), BudgetTier::Low);
        assert_eq!(classify_budget(200_000.0), BudgetTier::Low);
        assert_eq!(classify_budget(200_001.0), BudgetTier::Medium);
        assert_eq!(classify_budget(700_000.0), BudgetTier::Medium);
        assert_eq!(classify_budget(700_001.0), BudgetTier::High);
        assert_eq!(classify_budget(350_000.0).as_str(), "medium");
    }

    #[test]
    fn test_tier_table_lookup() {
        let fill = TierTable::new(0.82, 0.86, 0.90);
        assert_eq!(*fill.get(BudgetTier::Low), 0.82);
        assert_eq!(*fill.get(BudgetTier::High), 0.90);
    }
}
