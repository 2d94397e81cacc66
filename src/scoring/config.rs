use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::RankingError;
use super::factors::Factor;
use super::weights::{Preset, WeightVector};

/// Main scoring configuration.
///
/// Starts from a preset (balanced when unset) and overrides individual
/// factor weights on top of it.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   preset: research_focused
///   weights:
///     placements: 25
///     diversity: 0
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Preset id, e.g. "placement_focused"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Factor id -> weight. Kept loose so validation can report bad keys
    /// and negative values together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<String, i64>>,
}

impl ScoringConfig {
    /// Config holding exactly these weights, no preset
    pub fn from_weights(weights: &WeightVector) -> Self {
        Self {
            preset: None,
            weights: Some(
                weights
                    .entries()
                    .map(|(f, w)| (f.id().to_string(), i64::from(w)))
                    .collect(),
            ),
        }
    }

    /// Apply `other` on top of `self`.
    ///
    /// A preset in `other` replaces both the preset and the weight overrides
    /// of `self`; without one, `other`'s weights merge into `self`'s.
    pub fn merged(&self, other: &ScoringConfig) -> ScoringConfig {
        let mut merged = self.clone();
        if other.preset.is_some() {
            merged.preset = other.preset.clone();
            merged.weights = None;
        }
        if let Some(ref overrides) = other.weights {
            merged
                .weights
                .get_or_insert_with(BTreeMap::new)
                .extend(overrides.iter().map(|(k, v)| (k.clone(), *v)));
        }
        merged
    }

    /// Turn the config into a concrete weight vector.
    ///
    /// Does not check the total; run `validate_scoring` for a full report.
    pub fn resolve(&self) -> Result<WeightVector, RankingError> {
        let mut weights = match self.preset.as_deref() {
            Some(id) => id.parse::<Preset>()?.weights(),
            None => Preset::Balanced.weights(),
        };
        if let Some(ref overrides) = self.weights {
            for (key, &value) in overrides {
                let factor: Factor = key.parse()?;
                let value = u32::try_from(value).map_err(|_| RankingError::InvalidWeights)?;
                weights.set(factor, value);
            }
        }
        Ok(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolves_to_balanced() {
        let weights = ScoringConfig::default().resolve().unwrap();
        assert_eq!(weights, Preset::Balanced.weights());
    }

    #[test]
    fn test_overrides_apply_on_top_of_preset() {
        let yaml = r#"
preset: research_focused
weights:
  placements: 25
  diversity: 0
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let weights = config.resolve().unwrap();
        assert_eq!(weights.get(Factor::Academics), 30);
        assert_eq!(weights.get(Factor::Placements), 25);
        assert_eq!(weights.get(Factor::Diversity), 0);
    }

    #[test]
    fn test_resolve_rejects_unknown_preset_and_factor() {
        let config = ScoringConfig {
            preset: Some("nope".to_string()),
            weights: None,
        };
        assert_eq!(
            config.resolve(),
            Err(RankingError::UnknownPreset("nope".to_string()))
        );

        let config = ScoringConfig {
            preset: None,
            weights: Some(BTreeMap::from([("charm".to_string(), 5)])),
        };
        assert_eq!(
            config.resolve(),
            Err(RankingError::UnknownFactor("charm".to_string()))
        );
    }

    #[test]
    fn test_merge_cli_over_file() {
        let file = ScoringConfig {
            preset: Some("balanced".to_string()),
            weights: Some(BTreeMap::from([("research".to_string(), 40)])),
        };
        let cli = ScoringConfig {
            preset: None,
            weights: Some(BTreeMap::from([("innovation".to_string(), 0)])),
        };
        let merged = file.merged(&cli);
        assert_eq!(merged.preset.as_deref(), Some("balanced"));
        let weights = merged.weights.unwrap();
        assert_eq!(weights.get("research"), Some(&40));
        assert_eq!(weights.get("innovation"), Some(&0));
    }

    #[test]
    fn test_cli_preset_replaces_file_weights() {
        let file = ScoringConfig {
            preset: Some("balanced".to_string()),
            weights: Some(BTreeMap::from([("research".to_string(), 40)])),
        };
        let cli = ScoringConfig {
            preset: Some("placement_focused".to_string()),
            weights: Some(BTreeMap::from([("innovation".to_string(), 0)])),
        };
        let merged = file.merged(&cli);
        assert_eq!(merged.preset.as_deref(), Some("placement_focused"));
        let weights = merged.weights.unwrap();
        assert_eq!(weights.get("research"), None);
        assert_eq!(weights.get("innovation"), Some(&0));
    }

    #[test]
    fn test_cli_preset_overrides_saved_weights() {
        let saved = ScoringConfig::from_weights(&Preset::Balanced.weights());
        let cli = ScoringConfig {
            preset: Some("placement_focused".to_string()),
            weights: None,
        };
        let resolved = saved.merged(&cli).resolve().unwrap();
        assert_eq!(resolved, Preset::PlacementFocused.weights());
        assert_eq!(resolved.get(Factor::Placements), 35);
    }

    #[test]
    fn test_from_weights_roundtrip() {
        let original = Preset::InfrastructureFocused.weights();
        let config = ScoringConfig::from_weights(&original);
        assert!(config.preset.is_none());
        assert_eq!(config.resolve().unwrap(), original);
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig {
            preset: Some("reputation_focused".to_string()),
            weights: Some(BTreeMap::from([("faculty".to_string(), 12)])),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let yaml = "preset: balanced\nbase_score: 100\n";
        assert!(serde_saphyr::from_str::<ScoringConfig>(yaml).is_err());
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert!(config.preset.is_none());
        assert!(config.weights.is_none());
    }
}
