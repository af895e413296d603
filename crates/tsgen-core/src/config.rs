use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::output::OutputLayout;

/// Top-level project configuration loaded from `.tsgen.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TsgenConfig {
    /// Local file path or `http(s)://` URL of the document.
    pub input: String,
    /// Output directory.
    pub output: String,
    /// Path prefixes; one output file is generated per prefix. Empty means a
    /// single `types.ts` covering every path.
    pub prefixes: Vec<String>,
    pub layout: OutputLayout,
    /// Remove the output directory before writing.
    pub clean: bool,
}

impl Default for TsgenConfig {
    fn default() -> Self {
        Self {
            input: "openapi.json".to_string(),
            output: "dist".to_string(),
            prefixes: Vec::new(),
            layout: OutputLayout::Flat,
            clean: true,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".tsgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<TsgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# tsgen configuration
input: openapi.json     # local file (json/yaml) or http(s) URL
output: dist
clean: true             # remove the output directory before writing

# One file per prefix; leave empty to generate a single types.ts
prefixes: []
  # - /admin-api/channel-backend
  # - /app/resource

layout: flat            # flat (admin_api_channel_backend_types.ts) | nested (admin-api/channel-backend/type.ts)
"#
}
