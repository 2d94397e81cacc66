use super::config::ScoringConfig;
use super::factors::Factor;
use super::weights::Preset;

/// Validate scoring configuration before ranking.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref preset) = config.preset {
        if let Err(e) = preset.parse::<Preset>() {
            errors.push(format!("scoring.preset: {}", e));
        }
    }

    if let Some(ref weights) = config.weights {
        for (key, &value) in weights {
            if let Err(e) = key.parse::<Factor>() {
                errors.push(format!("scoring.weights.{}: {}", key, e));
            }
            if value < 0 {
                errors.push(format!("scoring.weights.{}: must be non-negative, got {}", key, value));
            } else if value > i64::from(u32::MAX) {
                errors.push(format!("scoring.weights.{}: too large ({})", key, value));
            }
        }
    }

    // Only meaningful once everything above resolves
    if errors.is_empty() {
        match config.resolve() {
            Ok(weights) if weights.total() == 0 => {
                errors.push("scoring.weights: at least one weight must be above zero".to_string());
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("scoring: {}", e)),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
