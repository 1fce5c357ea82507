use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::invocation::{
    AnimationPolicy, ClipPolicy, EncodePolicy, Gif2WebpPolicy, Mp3Policy, MuxPolicy,
};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub binaries: BinariesConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

/// Where executables are looked up
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BinariesConfig {
    /// Directories searched before `PATH`, in order
    #[serde(default)]
    pub bin_dirs: Vec<PathBuf>,
    /// Fall back to the `PATH` environment variable (default: true)
    #[serde(default = "default_search_path")]
    pub search_path: bool,
    /// Explicit per-tool executable paths, keyed by tool name (e.g. "cwebp")
    #[serde(default)]
    pub paths: HashMap<String, PathBuf>,
}

impl Default for BinariesConfig {
    fn default() -> Self {
        Self {
            bin_dirs: Vec::new(),
            search_path: default_search_path(),
            paths: HashMap::new(),
        }
    }
}

fn default_search_path() -> bool {
    true
}

/// Fixed argument templates, one section per operation
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TemplatesConfig {
    #[serde(default)]
    pub encode: EncodePolicy,
    #[serde(default)]
    pub mux: MuxPolicy,
    #[serde(default)]
    pub gif2webp: Gif2WebpPolicy,
    #[serde(default)]
    pub animate: AnimationPolicy,
    #[serde(default)]
    pub clip: ClipPolicy,
    #[serde(default)]
    pub mp3: Mp3Policy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.binaries.search_path);
        assert!(config.binaries.bin_dirs.is_empty());
        assert_eq!(config.templates, TemplatesConfig::default());
        assert_eq!(config.templates.encode.quality, 75);
        assert_eq!(config.templates.animate.first_frame_ms, 5000);
    }

    #[test]
    fn test_deserialize_binaries() {
        let toml = r#"
[binaries]
bin_dirs = ["/opt/libwebp/bin"]
search_path = false

[binaries.paths]
ffmpeg = "/usr/local/bin/ffmpeg"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.binaries.bin_dirs, vec![PathBuf::from("/opt/libwebp/bin")]);
        assert!(!config.binaries.search_path);
        assert_eq!(
            config.binaries.paths.get("ffmpeg"),
            Some(&PathBuf::from("/usr/local/bin/ffmpeg"))
        );
    }

    #[test]
    fn test_deserialize_partial_templates() {
        let toml = r#"
[templates.encode]
quality = 90

[templates.animate]
second_frame_ms = 1000

[templates.mp3]
audio_quality = 2
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.templates.encode.quality, 90);
        assert_eq!(config.templates.animate.second_frame_ms, 1000);
        assert_eq!(config.templates.animate.first_frame_ms, 5000);
        assert_eq!(config.templates.mp3.audio_quality, 2);
        assert_eq!(config.templates.mp3.audio_codec, "libmp3lame");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.templates, config.templates);
        assert_eq!(parsed.binaries.search_path, config.binaries.search_path);
    }
}
