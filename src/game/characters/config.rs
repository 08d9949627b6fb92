// Controller configuration - fixed per character at spawn

use thiserror::Error;

/// Tag carried by colliders the character can stand on
pub const GROUND_TAG: &str = "Ground";

/// Default tag of climbable trigger regions
pub const DEFAULT_CLIMB_REGION_TAG: &str = "Climb";

/// How long a hit keeps the character incapacitated, in seconds
pub const HURT_DURATION: f32 = 1.0;

/// Reasons a controller configuration is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive, finite number (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("climb region tag must not be empty")]
    EmptyClimbRegionTag,
}

/// Movement tuning for one character
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Horizontal speed at full input (units/second)
    pub move_speed: f32,
    /// Vertical velocity set on jump (units/second)
    pub jump_force: f32,
    /// Vertical speed on climbable surfaces at full input (units/second)
    pub climb_speed: f32,
    /// Trigger tag that marks climbable regions
    pub climb_region_tag: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_force: 10.0,
            climb_speed: 3.0,
            climb_region_tag: DEFAULT_CLIMB_REGION_TAG.to_string(),
        }
    }
}

impl ControllerConfig {
    /// Create a validated configuration
    pub fn new(
        move_speed: f32,
        jump_force: f32,
        climb_speed: f32,
        climb_region_tag: &str,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            move_speed,
            jump_force,
            climb_speed,
            climb_region_tag: climb_region_tag.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Use a different trigger tag for climbable regions
    pub fn with_climb_region_tag(mut self, tag: &str) -> Self {
        self.climb_region_tag = tag.to_string();
        self
    }

    /// Check every field
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("move_speed", self.move_speed)?;
        check_positive("jump_force", self.jump_force)?;
        check_positive("climb_speed", self.climb_speed)?;

        if self.climb_region_tag.is_empty() {
            return Err(ConfigError::EmptyClimbRegionTag);
        }

        Ok(())
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ControllerConfig::default();
        assert_eq!(config.move_speed, 5.0);
        assert_eq!(config.jump_force, 10.0);
        assert_eq!(config.climb_speed, 3.0);
        assert_eq!(config.climb_region_tag, "Climb");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_validates() {
        let config = ControllerConfig::new(8.0, 12.0, 4.0, "Ladder");
        assert!(config.is_ok());

        let err = ControllerConfig::new(0.0, 12.0, 4.0, "Ladder").unwrap_err();
        assert_eq!(
            err,
            ConfigError::NonPositive {
                field: "move_speed",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = ControllerConfig::new(5.0, f32::INFINITY, 3.0, "Climb").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "jump_force",
                ..
            }
        ));

        let err = ControllerConfig::new(5.0, 10.0, f32::NAN, "Climb").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "climb_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_tag() {
        let config = ControllerConfig::default().with_climb_region_tag("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyClimbRegionTag));
    }

    #[test]
    fn test_error_message() {
        let err = ConfigError::NonPositive {
            field: "move_speed",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "move_speed must be a positive, finite number (got -1)"
        );
    }
}
