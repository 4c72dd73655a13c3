use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Directory holding the four catalog CSV files
    pub data_dir: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
bind = "127.0.0.1:5000"

[catalog]
data_dir = "data"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the catalog data directory from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_data_dir(config: &Config) -> anyhow::Result<PathBuf> {
    let dir_str = &config.catalog.data_dir;
    let dir = Path::new(dir_str);

    // If absolute path, use as is
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }

    // If relative path, resolve it relative to the executable directory
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(dir));
        }
    }

    // Fallback: use relative to current directory
    Ok(PathBuf::from(dir_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:5000");
        assert_eq!(config.catalog.data_dir, "data");
    }

    #[test]
    fn test_absolute_data_dir_kept_as_is() {
        let config: Config = toml::from_str(
            r#"
[server]
bind = "0.0.0.0:5000"

[catalog]
data_dir = "/var/lib/property-chat/data"
"#,
        )
        .unwrap();
        let dir = get_data_dir(&config).unwrap();
        assert_eq!(dir, PathBuf::from("/var/lib/property-chat/data"));
    }
}
