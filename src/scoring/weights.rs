use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::RankingError;
use super::factors::Factor;

/// Relative importance of each factor.
///
/// Weights need not sum to 100; factors absent from the map weigh zero, so
/// an absent factor and an explicit zero compare equal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(BTreeMap<Factor, u32>);

impl PartialEq for WeightVector {
    fn eq(&self, other: &Self) -> bool {
        self.entries().eq(other.entries())
    }
}

impl Eq for WeightVector {}

impl WeightVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, factor: Factor) -> u32 {
        self.0.get(&factor).copied().unwrap_or(0)
    }

    pub fn set(&mut self, factor: Factor, weight: u32) {
        self.0.insert(factor, weight);
    }

    pub fn with(mut self, factor: Factor, weight: u32) -> Self {
        self.set(factor, weight);
        self
    }

    pub fn total(&self) -> u64 {
        self.0.values().map(|&w| u64::from(w)).sum()
    }

    /// All 8 factors in canonical order, zero-filled
    pub fn entries(&self) -> impl Iterator<Item = (Factor, u32)> + '_ {
        Factor::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Rescale so the weights sum to exactly 100.
    ///
    /// Each entry becomes the floor or ceiling of `weight * 100 / total`;
    /// leftover points go to the largest fractional parts, earlier factors
    /// first on ties. An entry can therefore land above its nearest integer:
    /// 3/3/3 gives 34/33/33, not 33/33/33. Fails when every weight is zero.
    pub fn normalized(&self) -> Result<WeightVector, RankingError> {
        let total = self.total();
        if total == 0 {
            return Err(RankingError::InvalidWeights);
        }
        let scale = 100.0 / total as f64;
        let mut scaled: Vec<(Factor, u32, f64)> = self
            .entries()
            .map(|(f, w)| {
                let exact = w as f64 * scale;
                (f, exact.floor() as u32, exact - exact.floor())
            })
            .collect();

        let assigned: u32 = scaled.iter().map(|(_, w, _)| w).sum();
        let mut order: Vec<usize> = (0..scaled.len()).collect();
        order.sort_by(|&a, &b| {
            scaled[b]
                .2
                .partial_cmp(&scaled[a].2)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for &i in order.iter().take(100u32.saturating_sub(assigned) as usize) {
            scaled[i].1 += 1;
        }

        Ok(scaled.into_iter().map(|(f, w, _)| (f, w)).collect())
    }
}

impl FromIterator<(Factor, u32)> for WeightVector {
    fn from_iter<I: IntoIterator<Item = (Factor, u32)>>(iter: I) -> Self {
        WeightVector(iter.into_iter().collect())
    }
}

/// A named, fixed weight profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Balanced,
    PlacementFocused,
    ResearchFocused,
    InfrastructureFocused,
    ReputationFocused,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Balanced,
        Preset::PlacementFocused,
        Preset::ResearchFocused,
        Preset::InfrastructureFocused,
        Preset::ReputationFocused,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Preset::Balanced => "balanced",
            Preset::PlacementFocused => "placement_focused",
            Preset::ResearchFocused => "research_focused",
            Preset::InfrastructureFocused => "infrastructure_focused",
            Preset::ReputationFocused => "reputation_focused",
        }
    }

    /// Weights in `Factor::ALL` order
    fn table(self) -> [u32; 8] {
        match self {
            Preset::Balanced => [15, 15, 12, 12, 12, 14, 10, 10],
            Preset::PlacementFocused => [20, 35, 10, 10, 5, 10, 5, 5],
            Preset::ResearchFocused => [30, 15, 5, 15, 20, 5, 5, 5],
            Preset::InfrastructureFocused => [15, 15, 35, 10, 5, 10, 5, 5],
            Preset::ReputationFocused => [20, 15, 10, 10, 5, 30, 5, 5],
        }
    }

    pub fn weights(self) -> WeightVector {
        Factor::ALL.into_iter().zip(self.table()).collect()
    }
}

impl std::str::FromStr for Preset {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Preset::ALL
            .into_iter()
            .find(|p| p.id() == s || p.id().replace('_', "-") == s)
            .ok_or_else(|| RankingError::UnknownPreset(s.to_string()))
    }
}

/// Look up a preset by id and return its weights.
pub fn apply_preset(preset_id: &str) -> Result<WeightVector, RankingError> {
    preset_id.parse::<Preset>().map(Preset::weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_cover_all_factors_and_sum_to_100() {
        for preset in Preset::ALL {
            let weights = apply_preset(preset.id()).unwrap();
            assert_eq!(weights.total(), 100, "{}", preset.id());
            for factor in Factor::ALL {
                assert!(weights.0.contains_key(&factor), "{} missing {}", preset.id(), factor);
            }
        }
    }

    #[test]
    fn test_preset_values_for_scenarios() {
        let research = apply_preset("research_focused").unwrap();
        assert_eq!(research.get(Factor::Academics), 30);
        assert_eq!(research.get(Factor::Placements), 15);

        let placement = apply_preset("placement_focused").unwrap();
        assert_eq!(placement.get(Factor::Academics), 20);
        assert_eq!(placement.get(Factor::Placements), 35);
    }

    #[test]
    fn test_preset_accepts_kebab_case() {
        assert_eq!(
            "placement-focused".parse::<Preset>().unwrap(),
            Preset::PlacementFocused
        );
    }

    #[test]
    fn test_unknown_preset() {
        assert_eq!(
            apply_preset("vibes_focused"),
            Err(RankingError::UnknownPreset("vibes_focused".to_string()))
        );
    }

    #[test]
    fn test_missing_factor_weighs_zero() {
        let weights = WeightVector::new().with(Factor::Research, 7);
        assert_eq!(weights.get(Factor::Research), 7);
        assert_eq!(weights.get(Factor::Diversity), 0);
        assert_eq!(weights.entries().count(), 8);
        assert_eq!(weights, weights.clone().with(Factor::Diversity, 0));
    }

    #[test]
    fn test_normalize_scales_to_100() {
        let weights = WeightVector::new()
            .with(Factor::Academics, 1)
            .with(Factor::Placements, 1)
            .with(Factor::Research, 2);
        let normalized = weights.normalized().unwrap();
        assert_eq!(normalized.get(Factor::Academics), 25);
        assert_eq!(normalized.get(Factor::Placements), 25);
        assert_eq!(normalized.get(Factor::Research), 50);
        assert_eq!(normalized.get(Factor::Faculty), 0);
        assert_eq!(normalized.total(), 100);
    }

    #[test]
    fn test_normalize_distributes_rounding_remainder() {
        // 33.33 each; the spare point goes to the first factor
        let weights = WeightVector::new()
            .with(Factor::Academics, 3)
            .with(Factor::Placements, 3)
            .with(Factor::Faculty, 3);
        let normalized = weights.normalized().unwrap();
        assert_eq!(normalized.get(Factor::Academics), 34);
        assert_eq!(normalized.get(Factor::Placements), 33);
        assert_eq!(normalized.get(Factor::Faculty), 33);
        assert_eq!(normalized.total(), 100);
    }

    #[test]
    fn test_normalize_entries_stay_near_exact_share() {
        // Naive rounding of 3.5, 6.5, 14.5, 20.5, 5.5, 48.5 would overshoot to 103
        let weights: WeightVector = Factor::ALL
            .into_iter()
            .zip([7, 13, 29, 41, 2, 0, 11, 97])
            .collect();
        let normalized = weights.normalized().unwrap();
        assert_eq!(normalized.total(), 100);
        for (factor, weight) in weights.entries() {
            let exact = weight as f64 * 100.0 / 200.0;
            assert!((normalized.get(factor) as f64 - exact).abs() < 1.0, "{}", factor);
        }
    }

    #[test]
    fn test_normalize_is_idempotent_within_one() {
        let samples = [
            [1, 2, 3, 4, 5, 6, 7, 8],
            [50, 50, 50, 0, 0, 0, 0, 1],
            [3, 3, 3, 3, 3, 3, 3, 3],
            [100, 0, 0, 0, 0, 0, 0, 0],
            [7, 13, 29, 41, 2, 0, 11, 97],
        ];
        for sample in samples {
            let weights: WeightVector = Factor::ALL.into_iter().zip(sample).collect();
            let once = weights.normalized().unwrap();
            let twice = once.normalized().unwrap();
            assert!((99..=101).contains(&once.total()), "{:?}", sample);
            for factor in Factor::ALL {
                let diff = once.get(factor) as i64 - twice.get(factor) as i64;
                assert!(diff.abs() <= 1, "{:?} {}", sample, factor);
            }
        }
    }

    #[test]
    fn test_normalize_zero_total_fails() {
        assert_eq!(WeightVector::new().normalized(), Err(RankingError::InvalidWeights));
        let zeros = WeightVector::new().with(Factor::Academics, 0);
        assert_eq!(zeros.normalized(), Err(RankingError::InvalidWeights));
    }

    #[test]
    fn test_weight_vector_yaml_shape() {
        let weights = WeightVector::new()
            .with(Factor::Academics, 40)
            .with(Factor::Innovation, 60);
        let yaml = serde_saphyr::to_string(&weights).unwrap();
        assert!(yaml.contains("academics: 40"));
        let parsed: WeightVector = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(parsed, weights);
    }
}
