//! Device classification and tilt handling.

use pagefx_core::{Size, Vec2};

/// User agent fragments that mark a mobile or tablet device.
const MOBILE_AGENTS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Tilt angles beyond this many degrees are clamped.
pub const MAX_TILT_DEGREES: f32 = 30.0;

/// What the host platform is and what it can sense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub user_agent: String,
    /// Whether the host can deliver device orientation events at all.
    pub orientation_supported: bool,
}

impl Platform {
    pub fn new(user_agent: impl Into<String>, orientation_supported: bool) -> Self {
        Self {
            user_agent: user_agent.into(),
            orientation_supported,
        }
    }

    /// Anything whose user agent names no known mobile or tablet device.
    pub fn is_desktop(&self) -> bool {
        let agent = self.user_agent.to_ascii_lowercase();
        !MOBILE_AGENTS.iter().any(|needle| agent.contains(needle))
    }

    /// Whether a field should listen for device orientation on this platform.
    pub fn listens_for_orientation(&self) -> bool {
        self.orientation_supported && !self.is_desktop()
    }
}

/// Device tilt in degrees, clamped and sign-inverted so tilting toward a side
/// shifts the field the way a pointer on that side would.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tilt {
    /// Front-to-back tilt, drives the y axis.
    pub beta: f32,
    /// Left-to-right tilt, drives the x axis.
    pub gamma: f32,
}

impl Tilt {
    /// Build from raw orientation angles.
    pub fn from_orientation(beta: f32, gamma: f32) -> Self {
        let clamp = |deg: f32| -deg.clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES);
        Self {
            beta: clamp(beta),
            gamma: clamp(gamma),
        }
    }

    /// Map the tilt range onto viewport coordinates, as if it were a pointer.
    pub fn to_pointer(self, viewport: Size) -> Vec2 {
        let span = MAX_TILT_DEGREES * 2.0;
        Vec2::new(
            (self.gamma + MAX_TILT_DEGREES) / span * viewport.width,
            (self.beta + MAX_TILT_DEGREES) / span * viewport.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_classification() {
        let desktop = Platform::new(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0",
            true,
        );
        assert!(desktop.is_desktop());
        assert!(!desktop.listens_for_orientation());

        let phone = Platform::new(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148",
            true,
        );
        assert!(!phone.is_desktop());
        assert!(phone.listens_for_orientation());

        let tablet_without_sensor = Platform::new("Mozilla/5.0 (Linux; Android 14)", false);
        assert!(!tablet_without_sensor.listens_for_orientation());
    }

    #[test]
    fn test_tilt_clamps_and_inverts() {
        let tilt = Tilt::from_orientation(45.0, -10.0);
        assert_eq!(tilt.beta, -30.0);
        assert_eq!(tilt.gamma, 10.0);
    }

    #[test]
    fn test_tilt_to_pointer() {
        let viewport = Size::new(600.0, 300.0);
        assert_eq!(Tilt::default().to_pointer(viewport), Vec2::new(300.0, 150.0));
        let full = Tilt::from_orientation(-90.0, -90.0);
        assert_eq!(full.to_pointer(viewport), Vec2::new(600.0, 300.0));
        let none = Tilt::from_orientation(30.0, 30.0);
        assert_eq!(none.to_pointer(viewport), Vec2::new(0.0, 0.0));
    }
}
