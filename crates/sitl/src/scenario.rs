//! Simulation scenario configuration

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Configuration for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Control loop rate (Hz); must match the controller configuration
    pub loop_rate_hz: u32,
    /// Initial vehicle position (m)
    pub initial_position: [f32; 3],
    /// Initial vehicle yaw (rad)
    pub initial_yaw: f32,
    /// Standard deviation of position measurement noise (m); 0 disables
    pub noise_std: f32,
    /// RNG seed for reproducible noise
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            loop_rate_hz: 20,
            initial_position: [0.0, 0.0, 0.0],
            initial_yaw: 0.0,
            noise_std: 0.0,
            seed: 0,
        }
    }
}

impl ScenarioConfig {
    /// Parse and validate a scenario from JSON.
    pub fn from_json(text: &str) -> Result<Self, HarnessError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), HarnessError> {
        if self.loop_rate_hz == 0 {
            return Err(HarnessError::InvalidScenario(
                "loop_rate_hz must be positive".into(),
            ));
        }
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(HarnessError::InvalidScenario(
                "noise_std must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    /// Control tick duration in seconds.
    pub fn dt(&self) -> f32 {
        1.0 / self.loop_rate_hz as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario() {
        let config = ScenarioConfig::default();
        assert_eq!(config.loop_rate_hz, 20);
        assert!((config.dt() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ScenarioConfig::from_json(r#"{"loop_rate_hz": 50}"#).unwrap();
        assert_eq!(config.loop_rate_hz, 50);
        assert!((config.noise_std - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_rate_rejected() {
        let err = ScenarioConfig::from_json(r#"{"loop_rate_hz": 0}"#).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidScenario(_)));
    }

    #[test]
    fn test_negative_noise_rejected() {
        let err = ScenarioConfig::from_json(r#"{"noise_std": -0.1}"#).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidScenario(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = ScenarioConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, HarnessError::ScenarioParse(_)));
    }
}
