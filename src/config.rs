use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigGroupBy {
    Service,
    Account,
    Region,
    Tag,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) group_by: Option<ConfigGroupBy>,
    #[serde(default)]
    pub(crate) tag_key: Option<String>,
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
}

impl Config {
    pub(crate) fn load() -> Self {
        Self::load_internal(false)
    }

    /// Quiet variant for machine-readable output modes
    pub(crate) fn load_quiet() -> Self {
        Self::load_internal(true)
    }

    fn load_internal(quiet: bool) -> Self {
        // Try config locations in order of priority
        for path in Self::config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        if !quiet {
                            eprintln!("Loaded config from {}", path.display());
                        }
                        return config;
                    }
                    Err(e) => {
                        if !quiet {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        Self::default()
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/costview/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("costview").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support, Windows AppData)
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("costview").join("config.toml"));
        }

        // 3. Dotfile fallback: ~/.costview.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".costview.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(
            r#"
            group_by = "tag"
            tag_key = "team"
            top_n = 7
            no_color = true
            color = "never"
        "#,
        )
        .unwrap();
        assert!(matches!(config.group_by, Some(ConfigGroupBy::Tag)));
        assert_eq!(config.tag_key.as_deref(), Some("team"));
        assert_eq!(config.top_n, Some(7));
        assert!(config.no_color);
        assert!(matches!(config.color, Some(ConfigColorMode::Never)));
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.group_by.is_none());
        assert!(config.tag_key.is_none());
        assert!(config.top_n.is_none());
        assert!(!config.no_color);
    }

    #[test]
    fn unknown_group_by_is_an_error() {
        assert!(toml::from_str::<Config>(r#"group_by = "project""#).is_err());
    }
}
