/// Which on-screen controls to offer. Guessed from the user agent; a wrong guess only changes the
/// hints and whether touches drive the joystick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ControlScheme {
    #[default]
    Desktop,
    Touch,
}

const TOUCH_AGENTS: [&str; 4] = ["iphone", "ipad", "ipod", "android"];

impl ControlScheme {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let user_agent = user_agent.to_ascii_lowercase();
        if TOUCH_AGENTS.iter().any(|agent| user_agent.contains(agent)) {
            ControlScheme::Touch
        } else {
            ControlScheme::Desktop
        }
    }

    pub fn hints(self) -> &'static [&'static str] {
        match self {
            ControlScheme::Desktop => &[
                "Click to capture the mouse",
                "WASD or arrow keys to move",
                "Mouse to look around",
                "1-6 to pick a cheese",
            ],
            ControlScheme::Touch => &["Joystick to move", "Swipe to look around"],
        }
    }

    pub fn uses_joystick(self) -> bool {
        self == ControlScheme::Touch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_agents_get_touch_controls() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
        assert_eq!(ControlScheme::from_user_agent(ua), ControlScheme::Touch);
        assert_eq!(
            ControlScheme::from_user_agent("Mozilla/5.0 (Linux; ANDROID 14; Pixel 8)"),
            ControlScheme::Touch
        );
    }

    #[test]
    fn everything_else_is_desktop() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64; rv:131.0) Gecko/20100101 Firefox/131.0";
        assert_eq!(ControlScheme::from_user_agent(ua), ControlScheme::Desktop);
        assert!(!ControlScheme::Desktop.uses_joystick());
        assert!(!ControlScheme::Desktop.hints().is_empty());
    }
}
