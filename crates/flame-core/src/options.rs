//! Construction-time configuration for the candle.

use crate::constants::*;
use thiserror::Error;

/// Options accepted when building a [`crate::FlameDynamics`].
///
/// Camera values are not used by the engine itself; they travel with the rest
/// of the configuration so the scene adapter can read them from one place.
#[derive(Clone, Debug, PartialEq)]
pub struct CandleOptions {
    pub flame_size: f32,
    pub recovery_speed: f32,
    pub light_intensity: f32,
    pub light_distance: f32,
    pub camera_distance: f32,
    pub camera_height: f32,
    pub blow_strength: f32,
    pub extinguish_threshold: f32,
}

impl Default for CandleOptions {
    fn default() -> Self {
        Self {
            flame_size: DEFAULT_FLAME_SIZE,
            recovery_speed: DEFAULT_RECOVERY_SPEED,
            light_intensity: DEFAULT_LIGHT_INTENSITY,
            light_distance: DEFAULT_LIGHT_DISTANCE,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            camera_height: DEFAULT_CAMERA_HEIGHT,
            blow_strength: DEFAULT_BLOW_STRENGTH,
            extinguish_threshold: EXTINGUISH_THRESHOLD,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("light_intensity must not be negative, got {0}")]
    NegativeIntensity(f32),
    #[error("blow_strength must lie in [0, 1], got {0}")]
    BlowStrengthOutOfRange(f32),
    #[error("extinguish_threshold must lie in (0, 1], got {0}")]
    ThresholdOutOfRange(f32),
}

impl CandleOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("flame_size", self.flame_size),
            ("recovery_speed", self.recovery_speed),
            ("light_intensity", self.light_intensity),
            ("light_distance", self.light_distance),
            ("camera_distance", self.camera_distance),
            ("camera_height", self.camera_height),
            ("blow_strength", self.blow_strength),
            ("extinguish_threshold", self.extinguish_threshold),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        for (field, value) in [
            ("flame_size", self.flame_size),
            ("recovery_speed", self.recovery_speed),
            ("light_distance", self.light_distance),
            ("camera_distance", self.camera_distance),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.light_intensity < 0.0 {
            return Err(ConfigError::NegativeIntensity(self.light_intensity));
        }
        if !(0.0..=1.0).contains(&self.blow_strength) {
            return Err(ConfigError::BlowStrengthOutOfRange(self.blow_strength));
        }
        if self.extinguish_threshold <= 0.0 || self.extinguish_threshold > 1.0 {
            return Err(ConfigError::ThresholdOutOfRange(self.extinguish_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(CandleOptions::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_recovery_speed() {
        let opts = CandleOptions {
            recovery_speed: 0.0,
            ..Default::default()
        };
        assert_eq!(
            opts.validate(),
            Err(ConfigError::NotPositive {
                field: "recovery_speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_nan_before_range_checks() {
        let opts = CandleOptions {
            flame_size: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            opts.validate(),
            Err(ConfigError::NotFinite {
                field: "flame_size",
                ..
            })
        ));
    }

    #[test]
    fn threshold_must_be_in_unit_interval() {
        for bad in [0.0, -0.5, 1.01] {
            let opts = CandleOptions {
                extinguish_threshold: bad,
                ..Default::default()
            };
            assert_eq!(opts.validate(), Err(ConfigError::ThresholdOutOfRange(bad)));
        }
        let opts = CandleOptions {
            extinguish_threshold: 0.8,
            ..Default::default()
        };
        assert!(opts.validate().is_ok());
    }
}
