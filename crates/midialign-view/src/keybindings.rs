//! Keybindings configuration for midialign
//!
//! Configurable keyboard shortcuts stored in YAML format.
//! Default location: ~/.config/midialign/keybindings.yaml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root keybindings configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub viewer: ViewerKeybindings,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            viewer: ViewerKeybindings::default(),
        }
    }
}

/// Keybindings for the viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerKeybindings {
    /// Play/pause the active panel (score when none is active)
    pub play_pause: Vec<String>,
    /// Toggle synchronized horizontal scrolling
    pub sync_toggle: Vec<String>,
    /// Move the selection to the previous note id
    pub select_prev: Vec<String>,
    /// Move the selection to the next note id
    pub select_next: Vec<String>,
}

impl Default for ViewerKeybindings {
    fn default() -> Self {
        Self {
            play_pause: vec!["Space".into()],
            sync_toggle: vec!["v".into()],
            select_prev: vec!["Left".into()],
            select_next: vec!["Right".into()],
        }
    }
}

impl ViewerKeybindings {
    pub fn matches(binding: &[String], key_str: &str) -> bool {
        binding.iter().any(|b| b == key_str)
    }
}

/// Get the default keybindings file path
///
/// Returns: ~/.config/midialign/keybindings.yaml
pub fn default_keybindings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("midialign")
        .join("keybindings.yaml")
}

/// Load keybindings from a YAML file
///
/// If the file doesn't exist, returns default keybindings.
/// If the file exists but is invalid, logs a warning and returns defaults.
pub fn load_keybindings(path: &Path) -> KeybindingsConfig {
    log::info!("load_keybindings: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_keybindings: File doesn't exist, using defaults");
        return KeybindingsConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<KeybindingsConfig>(&contents) {
            Ok(config) => {
                log::info!("load_keybindings: Loaded custom keybindings");
                config
            }
            Err(e) => {
                log::warn!("load_keybindings: Failed to parse: {}, using defaults", e);
                KeybindingsConfig::default()
            }
        },
        Err(e) => {
            log::warn!("load_keybindings: Failed to read file: {}, using defaults", e);
            KeybindingsConfig::default()
        }
    }
}

/// Save keybindings to a YAML file
pub fn save_keybindings(config: &KeybindingsConfig, path: &Path) -> anyhow::Result<()> {
    log::info!("save_keybindings: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(path, yaml)?;

    Ok(())
}

/// Convert an iced keyboard key + modifiers to a string for matching
///
/// Format: "Shift+Ctrl+Alt+KeyName"
pub fn key_to_string(key: &iced::keyboard::Key, modifiers: &iced::keyboard::Modifiers) -> String {
    use iced::keyboard::{key::Named, Key};

    let mut parts = Vec::new();
    if modifiers.shift() {
        parts.push("Shift");
    }
    if modifiers.control() {
        parts.push("Ctrl");
    }
    if modifiers.alt() {
        parts.push("Alt");
    }

    let key_name = match key {
        Key::Named(named) => match named {
            Named::Space => "Space".to_string(),
            Named::ArrowUp => "Up".to_string(),
            Named::ArrowDown => "Down".to_string(),
            Named::ArrowLeft => "Left".to_string(),
            Named::ArrowRight => "Right".to_string(),
            Named::Enter => "Enter".to_string(),
            Named::Escape => "Escape".to_string(),
            Named::Tab => "Tab".to_string(),
            Named::Backspace => "Backspace".to_string(),
            Named::Delete => "Delete".to_string(),
            Named::Home => "Home".to_string(),
            Named::End => "End".to_string(),
            Named::PageUp => "PageUp".to_string(),
            Named::PageDown => "PageDown".to_string(),
            _ => return String::new(), // Ignore other named keys
        },
        Key::Character(c) => c.to_string(),
        _ => return String::new(),
    };

    if parts.is_empty() {
        key_name
    } else {
        parts.push(&key_name);
        parts.join("+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::{key::Named, Key, Modifiers};

    #[test]
    fn test_defaults() {
        let config = KeybindingsConfig::default();
        assert_eq!(config.viewer.play_pause, vec!["Space"]);
        assert_eq!(config.viewer.sync_toggle, vec!["v"]);
        assert_eq!(config.viewer.select_prev, vec!["Left"]);
        assert_eq!(config.viewer.select_next, vec!["Right"]);
    }

    #[test]
    fn test_key_to_string_named_and_character() {
        let none = Modifiers::default();
        assert_eq!(key_to_string(&Key::Named(Named::Space), &none), "Space");
        assert_eq!(
            key_to_string(&Key::Named(Named::ArrowLeft), &none),
            "Left"
        );
        assert_eq!(
            key_to_string(&Key::Character("v".into()), &none),
            "v"
        );
    }

    #[test]
    fn test_key_to_string_with_modifiers() {
        let shift = Modifiers::SHIFT;
        assert_eq!(
            key_to_string(&Key::Named(Named::ArrowRight), &shift),
            "Shift+Right"
        );
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = KeybindingsConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: KeybindingsConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.viewer.sync_toggle, config.viewer.sync_toggle);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "viewer:\n  sync_toggle: [\"s\"]\n";
        let parsed: KeybindingsConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.viewer.sync_toggle, vec!["s"]);
        assert_eq!(parsed.viewer.play_pause, vec!["Space"]);
    }
}
