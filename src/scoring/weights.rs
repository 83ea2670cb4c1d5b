use serde::{Deserialize, Serialize};

/// Weights for the combined "best players" ranking. The accuracy weight in
/// particular has been retuned several times, so it lives in configuration
/// instead of code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeWeights {
    pub kills: f64,
    pub damage: f64,
    pub accuracy: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            kills: 0.5,
            damage: 0.3,
            accuracy: 1.5,
        }
    }
}

impl CompositeWeights {
    pub fn validate(&self) -> Result<(), String> {
        if self.kills < 0.0 || self.damage < 0.0 || self.accuracy < 0.0 {
            return Err("All composite weights must be non-negative".to_string());
        }
        Ok(())
    }
}
