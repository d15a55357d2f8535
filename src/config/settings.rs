//! Configuration loading and persistence
//!
//! Binds externalized values onto a [`JsfProperties`] tree. Sources are
//! layered from lowest to highest precedence:
//! 1. Built-in defaults
//! 2. User configuration file
//! 3. Explicit configuration file (`--config`)
//! 4. Environment variables (`JSF_PRIMEFACES__THEME`, ...)

use super::properties::JsfProperties;
use crate::error::{InitParamsError, Result};
use config::{Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of every bound property path
pub const PROPERTY_PREFIX: &str = "jsf";

/// Prefix of environment variables bound onto the tree
pub const ENV_PREFIX: &str = "JSF";

/// Separator between path segments in environment variable names
pub const ENV_SEPARATOR: &str = "__";

const CONFIG_DIR_NAME: &str = "initparams";
const CONFIG_FILE_NAME: &str = "initparams.toml";

/// Default location of the user configuration file
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(xdg_config_home) => PathBuf::from(xdg_config_home),
        None => dirs::config_dir()
            .ok_or_else(|| InitParamsError::config("Unable to determine config directory"))?,
    };
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Environment variable the binder reads for a dotted property path
/// (`jsf.primefaces.mobile.theme` -> `JSF_PRIMEFACES__MOBILE__THEME`)
pub fn env_var_for_property(path: &str) -> String {
    let path = path
        .strip_prefix(PROPERTY_PREFIX)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(path);
    let segments: Vec<String> = path.split('.').map(str::to_ascii_uppercase).collect();
    format!("{}_{}", ENV_PREFIX, segments.join(ENV_SEPARATOR))
}

/// Pick the file format from the extension, defaulting to TOML
pub fn file_format_for(path: &Path) -> Result<FileFormat> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        None | Some("toml") | Some("conf") => Ok(FileFormat::Toml),
        Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
        Some("json") => Ok(FileFormat::Json),
        Some(other) => Err(InitParamsError::invalid_argument(format!(
            "Unsupported configuration file extension '{}' ({})",
            other,
            path.display()
        ))),
    }
}

/// Layered binder for the property tree
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    user_config: Option<PathBuf>,
    explicit_config: Option<PathBuf>,
    env_prefix: String,
    env_source: Option<config::Map<String, String>>,
    use_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            user_config: get_config_path().ok(),
            explicit_config: None,
            env_prefix: ENV_PREFIX.to_string(),
            env_source: None,
            use_env: true,
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader that only reads the given sources, no user file
    pub fn isolated() -> Self {
        Self {
            user_config: None,
            ..Self::default()
        }
    }

    pub fn with_user_config<P: Into<PathBuf>>(mut self, path: Option<P>) -> Self {
        self.user_config = path.map(Into::into);
        self
    }

    pub fn with_config_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.explicit_config = Some(path.into());
        self
    }

    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Read environment variables from the given map instead of the process
    pub fn with_env_source(mut self, source: config::Map<String, String>) -> Self {
        self.env_source = Some(source);
        self
    }

    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Bind all sources onto a fresh tree and validate the result
    pub async fn load(&self) -> Result<JsfProperties> {
        let properties = self.load_no_validation().await?;
        validate(&properties)?;
        Ok(properties)
    }

    /// Bind all sources without validating (for `show` and `init`)
    pub async fn load_no_validation(&self) -> Result<JsfProperties> {
        let defaults = toml::to_string_pretty(&JsfProperties::default())?;
        let mut builder = config::Config::builder()
            .add_source(File::from_str(&defaults, FileFormat::Toml));

        if let Some(path) = &self.user_config {
            if path.exists() {
                debug!("Loading user configuration from {}", path.display());
                builder = builder.add_source(read_source(path).await?);
            }
        }

        if let Some(path) = &self.explicit_config {
            if !path.exists() {
                return Err(InitParamsError::config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(read_source(path).await?);
        }

        if self.use_env {
            builder = builder.add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .source(self.env_source.clone()),
            );
        }

        let properties: JsfProperties = builder.build()?.try_deserialize()?;
        info!("Bound configuration properties under '{}'", PROPERTY_PREFIX);
        Ok(properties)
    }
}

async fn read_source(path: &Path) -> Result<config::Config> {
    let format = file_format_for(path)?;
    let contents = tokio::fs::read_to_string(path).await?;
    let source = config::Config::builder()
        .add_source(File::from_str(&contents, format))
        .build()?;
    Ok(source)
}

/// Check bound values the target library would reject
pub fn validate(properties: &JsfProperties) -> Result<()> {
    let faces = &properties.faces;
    if let Some(period) = faces.facelets_refresh_period {
        if period < -1 {
            return Err(InitParamsError::config(format!(
                "faces.facelets_refresh_period must be -1 or greater, got {}",
                period
            )));
        }
    }
    check_not_blank("faces.facelets_suffix", &faces.facelets_suffix)?;

    let primefaces = &properties.primefaces;
    check_not_blank("primefaces.theme", &primefaces.theme)?;
    check_not_blank("primefaces.mobile.theme", &primefaces.mobile.theme)?;
    check_not_blank("primefaces.push_server_url", &primefaces.push_server_url)?;
    check_not_blank("primefaces.secret", &primefaces.secret)?;

    Ok(())
}

// Empty counts as unset and passes.
fn check_not_blank(path: &str, value: &Option<String>) -> Result<()> {
    match value {
        Some(v) if !v.is_empty() && v.trim().is_empty() => Err(InitParamsError::config(format!(
            "{}.{} must not be blank",
            PROPERTY_PREFIX, path
        ))),
        _ => Ok(()),
    }
}

/// Write the properties as TOML
pub async fn save_config(path: &Path, properties: &JsfProperties) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let contents = toml::to_string_pretty(properties)?;
    tokio::fs::write(path, contents).await?;
    info!("Saved configuration to {}", path.display());

    Ok(())
}

/// Write the default configuration. Returns whether a file was written;
/// an existing file is only replaced when `force` is set.
pub async fn init_default_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        debug!("Configuration already exists at {}", path.display());
        return Ok(false);
    }

    save_config(path, &JsfProperties::default()).await?;
    Ok(true)
}
