//! Viewer settings with persistence
//!
//! Settings are saved to `~/.config/panorama/settings.toml`

use std::fs;
use std::path::PathBuf;

use panorama_camera::CameraConfig;
use panorama_core::{AxisMask, ViewportSize};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All viewer settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub camera: CameraConfig,
    pub axes: AxisSettings,
    pub display: DisplaySettings,
    pub simulation: SimulationSettings,
}

impl ViewerSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("panorama"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Which axes each input path may drive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    pub gesture_horizontal: bool,
    pub gesture_vertical: bool,
    pub motion_horizontal: bool,
    pub motion_vertical: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            gesture_horizontal: true,
            gesture_vertical: true,
            motion_horizontal: true,
            motion_vertical: true,
        }
    }
}

impl AxisSettings {
    /// Mask for the pan gesture path
    pub fn gesture_mask(&self) -> AxisMask {
        mask(self.gesture_horizontal, self.gesture_vertical)
    }

    /// Mask for the motion sensor path
    pub fn motion_mask(&self) -> AxisMask {
        mask(self.motion_horizontal, self.motion_vertical)
    }
}

fn mask(horizontal: bool, vertical: bool) -> AxisMask {
    let mut mask = AxisMask::NONE;
    if horizontal {
        mask.insert(AxisMask::HORIZONTAL);
    }
    if vertical {
        mask.insert(AxisMask::VERTICAL);
    }
    mask
}

/// Simulated display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// View width in points (portrait)
    pub width: f32,
    /// View height in points (portrait)
    pub height: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

impl DisplaySettings {
    /// Portrait viewport
    pub fn portrait(&self) -> ViewportSize {
        ViewportSize::new(self.width, self.height)
    }

    /// The same display rotated to landscape
    pub fn landscape(&self) -> ViewportSize {
        ViewportSize::new(self.height, self.width)
    }
}

/// Headless session parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Render ticks per second
    pub frame_rate: f32,
    /// Ticks spent in each phase of the demo
    pub frames_per_phase: u32,
    /// Maximum magnitude of simulated sensor jitter (rad/s)
    pub jitter: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            frames_per_phase: 60,
            jitter: 0.08,
        }
    }
}
