//! Data-driven game balance
//!
//! Defaults match the classic easter-egg feel; hosts may override any
//! subset of fields from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Speed curve and food sizing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Inter-tick delay at score 0 (ms)
    pub initial_speed_ms: u64,
    /// Delay removed per point (ms)
    pub speed_increment_ms: u64,
    /// Floor of the speed curve (ms)
    pub min_speed_ms: u64,
    /// Smallest food, as a fraction of a cell
    pub min_food_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_speed_ms: INITIAL_SPEED,
            speed_increment_ms: SPEED_INCREMENT,
            min_speed_ms: MIN_SPEED,
            min_food_size: MIN_FOOD_SIZE,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; anything unparseable falls back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) => tuning.sanitized(),
            Err(err) => {
                log::warn!("Ignoring invalid tuning ({err}), using defaults");
                Self::default()
            }
        }
    }

    /// Clamp fields into their meaningful ranges
    pub fn sanitized(mut self) -> Self {
        self.min_food_size = if self.min_food_size.is_finite() {
            self.min_food_size.clamp(0.0, 1.0)
        } else {
            MIN_FOOD_SIZE
        };
        self.min_speed_ms = self.min_speed_ms.min(self.initial_speed_ms);
        self
    }

    /// Inter-tick delay for a given score.
    ///
    /// Monotonically non-increasing in `score`, never below `min_speed_ms`.
    pub fn speed_for_score(&self, score: u32) -> u64 {
        let reduction = u64::from(score).saturating_mul(self.speed_increment_ms);
        self.initial_speed_ms
            .saturating_sub(reduction)
            .max(self.min_speed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_curve_starts_at_initial() {
        let tuning = Tuning::default();
        assert_eq!(tuning.speed_for_score(0), INITIAL_SPEED);
        assert_eq!(tuning.speed_for_score(1), INITIAL_SPEED - SPEED_INCREMENT);
    }

    #[test]
    fn test_speed_floor() {
        let tuning = Tuning::default();
        // 150 - 21 * 5 = 45 < 50
        assert_eq!(tuning.speed_for_score(21), MIN_SPEED);
        assert_eq!(tuning.speed_for_score(20), MIN_SPEED);
        assert_eq!(tuning.speed_for_score(1_000), MIN_SPEED);
        assert_eq!(tuning.speed_for_score(u32::MAX), MIN_SPEED);
    }

    #[test]
    fn test_speed_curve_is_monotonic() {
        let tuning = Tuning::default();
        let mut prev = tuning.speed_for_score(0);
        for score in 1..100 {
            let speed = tuning.speed_for_score(score);
            assert!(speed <= prev);
            prev = speed;
        }
    }

    #[test]
    fn test_from_json_partial_override() {
        let tuning = Tuning::from_json(r#"{"min_speed_ms": 80}"#);
        assert_eq!(tuning.min_speed_ms, 80);
        assert_eq!(tuning.initial_speed_ms, INITIAL_SPEED);
    }

    #[test]
    fn test_from_json_invalid_falls_back() {
        assert_eq!(Tuning::from_json("not json"), Tuning::default());
    }

    #[test]
    fn test_sanitize_clamps_food_size() {
        let tuning = Tuning::from_json(r#"{"min_food_size": 3.5}"#);
        assert_eq!(tuning.min_food_size, 1.0);
    }
}
