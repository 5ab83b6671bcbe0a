use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Port used when the document does not declare one.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bound on schema synthesis recursion.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Knobs for a single conversion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Listening port of the skeleton environment.
    pub default_port: u16,
    /// Nesting level after which the example synthesizer stops descending.
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_port: DEFAULT_PORT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Top-level project configuration loaded from `.oam.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OamConfig {
    pub input: String,
    /// Where the environment JSON is written; stdout when unset.
    pub output: Option<String>,
    pub environment: EnvironmentConfig,
    pub synthesis: SynthesisConfig,
}

impl Default for OamConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: None,
            environment: EnvironmentConfig::default(),
            synthesis: SynthesisConfig::default(),
        }
    }
}

impl OamConfig {
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            default_port: self.environment.port,
            max_depth: self.synthesis.max_depth,
        }
    }
}

/// Skeleton environment defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub port: u16,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

/// Example body synthesis options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub max_depth: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oam.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OamConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: OamConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oam configuration
input: openapi.yaml
# output: environment.json   # stdout when omitted

environment:
  port: 3000            # used when the document declares no port

synthesis:
  max_depth: 16         # nesting bound for generated example bodies
"#
}
