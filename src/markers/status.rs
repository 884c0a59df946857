//! Device status and its marker palette.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Live state of a device on the globe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Active,
    Idle,
    #[default]
    Offline,
}

impl DeviceStatus {
    /// Marker color as sRGB bytes.
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Active => [0x10, 0xb9, 0x81],
            Self::Idle => [0xf5, 0x9e, 0x0b],
            Self::Offline => [0xef, 0x44, 0x44],
        }
    }

    /// Marker color as a `#rrggbb` string.
    pub fn hex(&self) -> String {
        let [r, g, b] = self.color();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Marker color as normalized RGBA for vertex data.
    pub fn rgba(&self) -> [f32; 4] {
        let [r, g, b] = self.color();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Idle => "idle",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DeviceStatus {
    type Err = std::convert::Infallible;

    /// Unknown statuses are treated as offline.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "idle" => Self::Idle,
            _ => Self::Offline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette() {
        assert_eq!(DeviceStatus::Active.hex(), "#10b981");
        assert_eq!(DeviceStatus::Idle.hex(), "#f59e0b");
        assert_eq!(DeviceStatus::Offline.hex(), "#ef4444");
        assert_eq!(DeviceStatus::Offline.rgba()[3], 1.0);
    }

    #[test]
    fn test_parse_falls_back_to_offline() {
        assert_eq!("Active".parse::<DeviceStatus>().unwrap(), DeviceStatus::Active);
        assert_eq!(" idle ".parse::<DeviceStatus>().unwrap(), DeviceStatus::Idle);
        assert_eq!("rebooting".parse::<DeviceStatus>().unwrap(), DeviceStatus::Offline);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&DeviceStatus::Idle).unwrap(), "\"idle\"");
        let s: DeviceStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(s, DeviceStatus::Active);
    }
}
