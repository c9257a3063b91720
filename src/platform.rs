use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Origin used by the Android emulator to reach the host machine.
pub const ANDROID_ORIGIN: &str = "http://10.0.2.2:8080";
pub const LOCAL_ORIGIN: &str = "http://localhost:8080";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Web,
    Desktop,
}

/// Where the session token lives on a given platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenBackend {
    /// Private per-key files (the mobile secure-store equivalent).
    SecureFile,
    /// Shared JSON key-value file (the browser storage equivalent).
    KeyValue,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_family = "wasm") {
            Platform::Web
        } else {
            Platform::Desktop
        }
    }

    pub fn default_origin(self) -> &'static str {
        match self {
            Platform::Android => ANDROID_ORIGIN,
            Platform::Ios | Platform::Web | Platform::Desktop => LOCAL_ORIGIN,
        }
    }

    pub fn token_backend(self) -> TokenBackend {
        match self {
            Platform::Web => TokenBackend::KeyValue,
            Platform::Android | Platform::Ios | Platform::Desktop => TokenBackend::SecureFile,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Web => "web",
            Platform::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            "web" => Ok(Platform::Web),
            "desktop" => Ok(Platform::Desktop),
            other => Err(format!("Unknown platform: {}", other)),
        }
    }
}
