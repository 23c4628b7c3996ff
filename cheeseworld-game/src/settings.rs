use glam::{vec3, Vec3};
use serde::Deserialize;

/// Tunables for a session. Every field may be left out of a settings file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Walking speed in units per second.
    pub walk_speed: f32,
    /// Lowest height the camera may reach.
    pub floor_height: f32,
    pub spawn: Vec3,
    /// Degrees of head rotation per pixel of pointer movement.
    pub mouse_sensitivity: f32,
    /// Pixel radius of the on-screen joystick.
    pub joystick_radius: f32,
    /// Half-width of the starting platform, so the platform is `2 * radius + 1` blocks across.
    pub platform_radius: i32,
    /// Furthest distance at which a click can pick a block.
    pub reach: f32,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // 0.1 units per frame at 60 frames per second.
            walk_speed: 6.0,
            floor_height: 2.0,
            spawn: vec3(0.0, 2.0, 5.0),
            mouse_sensitivity: 0.1,
            joystick_radius: 50.0,
            platform_radius: 5,
            reach: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = Settings::from_json(r#"{ "walk_speed": 3.5, "spawn": [1.0, 4.0, 2.0] }"#)
            .unwrap();
        assert_eq!(settings.walk_speed, 3.5);
        assert_eq!(settings.spawn, vec3(1.0, 4.0, 2.0));
        assert_eq!(settings.floor_height, 2.0);
        assert_eq!(settings.platform_radius, 5);
    }

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn malformed_settings_are_an_error() {
        assert!(Settings::from_json(r#"{ "walk_speed": "fast" }"#).is_err());
    }
}
