use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::quiz::QuizResponse;

/// Aggregate counts over every saved quiz response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizStatistics {
    pub total_responses: u64,
    /// Responses selecting each scent family, keyed by its wire name.
    pub scent_preferences: BTreeMap<String, u64>,
    /// Responses per lifestyle; blank lifestyles are counted under "unspecified".
    pub lifestyle_distribution: BTreeMap<String, u64>,
    pub seasonal_preferences: BTreeMap<String, u64>,
}

impl QuizStatistics {
    pub fn compute(responses: &[QuizResponse]) -> Self {
        let mut statistics = Self {
            total_responses: responses.len() as u64,
            ..Self::default()
        };

        for response in responses {
            let preferences = &response.preferences;
            for (family, selected) in preferences.scent_families() {
                *statistics.scent_preferences.entry(family.to_owned()).or_insert(0) +=
                    u64::from(selected);
            }
            for (season, selected) in preferences.seasons() {
                *statistics.seasonal_preferences.entry(season.to_owned()).or_insert(0) +=
                    u64::from(selected);
            }

            let lifestyle = response.lifestyle.trim().to_lowercase();
            let lifestyle = if lifestyle.is_empty() { "unspecified".to_owned() } else { lifestyle };
            *statistics.lifestyle_distribution.entry(lifestyle).or_insert(0) += 1;
        }

        statistics
    }
}
