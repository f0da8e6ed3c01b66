use std::env;

use crate::error::ConfigError;

pub const ENV_MOVEMENT_SCALE: &str = "POSEBRIDGE_MOVEMENT_SCALE";
pub const ENV_SPEED: &str = "POSEBRIDGE_SPEED";
pub const ENV_JUMP: &str = "POSEBRIDGE_JUMP";

/// Touch-to-force constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceConfig {
    /// Multiplier applied to every mapped force vector
    pub speed: f32,
    /// Vertical magnitude produced by a single tap, before `speed`
    pub jump: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            jump: 5.0,
        }
    }
}

/// Construction-time settings of a [`PoseController`](crate::controller::PoseController).
///
/// Two deployments exist: a touch-driven one that also pushes a physics body
/// around, and a tracking-only one with a larger movement scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub movement_scale: f32,
    /// `None` disables the touch-to-force mapping entirely
    pub force: Option<ForceConfig>,
}

impl ControllerConfig {
    pub fn touch_driven() -> Self {
        Self {
            movement_scale: 3.0,
            force: Some(ForceConfig::default()),
        }
    }

    pub fn tracking_only() -> Self {
        Self {
            movement_scale: 10.0,
            force: None,
        }
    }

    pub fn with_movement_scale(mut self, movement_scale: f32) -> Self {
        self.movement_scale = movement_scale;
        self
    }

    pub fn with_force(mut self, speed: f32, jump: f32) -> Self {
        self.force = Some(ForceConfig { speed, jump });
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("movement_scale", self.movement_scale)?;
        if let Some(force) = &self.force {
            check_finite("speed", force.speed)?;
            check_finite("jump", force.jump)?;
        }
        Ok(())
    }

    /// Override fields from `POSEBRIDGE_*` variables, then validate.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| env::var(var).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(scale) = parse_var(ENV_MOVEMENT_SCALE, &lookup)? {
            self.movement_scale = scale;
        }

        let speed = parse_var(ENV_SPEED, &lookup)?;
        let jump = parse_var(ENV_JUMP, &lookup)?;
        match self.force.as_mut() {
            Some(force) => {
                if let Some(speed) = speed {
                    force.speed = speed;
                }
                if let Some(jump) = jump {
                    force.jump = jump;
                }
            }
            None if speed.is_some() => return Err(ConfigError::ForceDisabled { var: ENV_SPEED }),
            None if jump.is_some() => return Err(ConfigError::ForceDisabled { var: ENV_JUMP }),
            None => {}
        }

        self.validate()?;
        Ok(self)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::touch_driven()
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn parse_var<F>(var: &'static str, lookup: &F) -> Result<Option<f32>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<f32>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_presets() {
        let touch = ControllerConfig::touch_driven();
        assert_eq!(touch.movement_scale, 3.0);
        assert!(touch.force.is_some());

        let tracking = ControllerConfig::tracking_only();
        assert_eq!(tracking.movement_scale, 10.0);
        assert!(tracking.force.is_none());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let err = ControllerConfig::tracking_only()
            .with_movement_scale(f32::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { field: "movement_scale", .. }));

        let err = ControllerConfig::touch_driven()
            .with_force(f32::INFINITY, 1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { field: "speed", .. }));
    }

    #[test]
    fn test_overrides_apply() {
        let config = ControllerConfig::touch_driven()
            .with_overrides(lookup_from(&[(ENV_MOVEMENT_SCALE, "4.5"), (ENV_SPEED, " 2 ")]))
            .unwrap();
        assert_eq!(config.movement_scale, 4.5);
        assert_eq!(config.force.unwrap().speed, 2.0);
        assert_eq!(config.force.unwrap().jump, ForceConfig::default().jump);
    }

    #[test]
    fn test_overrides_reject_garbage() {
        let err = ControllerConfig::touch_driven()
            .with_overrides(lookup_from(&[(ENV_JUMP, "high")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv { var: ENV_JUMP, value: "high".to_string() }
        );
    }

    #[test]
    fn test_force_override_without_force_mapping() {
        let err = ControllerConfig::tracking_only()
            .with_overrides(lookup_from(&[(ENV_SPEED, "2")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::ForceDisabled { var: ENV_SPEED });
    }

    #[test]
    fn test_no_overrides_is_identity() {
        let config = ControllerConfig::tracking_only().with_overrides(|_| None).unwrap();
        assert_eq!(config, ControllerConfig::tracking_only());
    }
}
