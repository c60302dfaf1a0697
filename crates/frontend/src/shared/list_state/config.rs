use serde::Deserialize;

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
endpoint = ""
page_size = 20
page_size_options = [20, 50, 100, 200]
search_debounce_ms = 400
"#;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid list view config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid list view config: {0}")]
    Invalid(String),
}

/// Settings of one list view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListViewConfig {
    /// Path of the list endpoint, e.g. `/api/backlog-items`
    #[serde(default)]
    pub endpoint: String,
    /// Backend origin; `None` means same origin as the page
    #[serde(default)]
    pub api_base: Option<String>,
    pub page_size: u32,
    pub page_size_options: Vec<u32>,
    pub search_debounce_ms: u32,
}

impl Default for ListViewConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_base: None,
            page_size: 20,
            page_size_options: vec![20, 50, 100, 200],
            search_debounce_ms: 400,
        }
    }
}

impl ListViewConfig {
    /// Parses a view config. Missing keys are taken from the embedded default.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(DEFAULT_CONFIG)?;
        let overrides: toml::Table = toml::from_str(contents)?;
        table.extend(overrides);

        let mut config: ListViewConfig = toml::Value::Table(table).try_into()?;
        config.normalize()?;
        Ok(config)
    }

    /// Same as [`from_toml`](Self::from_toml), falling back to the default config on error.
    pub fn load(contents: &str) -> Self {
        match Self::from_toml(contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default list view configuration");
                Self::default()
            }
        }
    }

    fn normalize(&mut self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be positive".into()));
        }
        self.page_size_options.retain(|size| *size > 0);
        if !self.page_size_options.contains(&self.page_size) {
            self.page_size_options.push(self.page_size);
        }
        self.page_size_options.sort_unstable();
        self.page_size_options.dedup();
        if self.api_base.as_deref().is_some_and(str::is_empty) {
            self.api_base = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = ListViewConfig::from_toml("").unwrap();
        assert_eq!(config, ListViewConfig::default());
    }

    #[test]
    fn test_overrides_merge_with_default() {
        let config = ListViewConfig::from_toml(
            r#"
            endpoint = "/api/backlog-items"
            page_size = 30
            api_base = ""
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint, "/api/backlog-items");
        assert_eq!(config.page_size_options, vec![20, 30, 50, 100, 200]);
        assert_eq!(config.search_debounce_ms, 400);
        assert_eq!(config.api_base, None);
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        assert!(ListViewConfig::from_toml("page_size = 0").is_err());
        assert!(ListViewConfig::from_toml("page_size = \"many\"").is_err());
        assert_eq!(ListViewConfig::load("page_size = 0"), ListViewConfig::default());
    }
}
