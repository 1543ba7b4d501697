use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Metadata catalog access (TMDB-compatible API).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    pub api_key: String,
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

/// Backend-as-a-service holding auth and the tracked-item rows.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    pub project_url: String,
    /// The project's publishable (anon) key, sent with every request
    pub publishable_key: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UiConfig {
    /// Rows shown per search/recommendation listing
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Size of the sampled recommendation set
    #[serde(default = "default_recommendations")]
    pub recommendations: usize,
}

fn default_catalog_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_page_size() -> usize {
    20
}

fn default_recommendations() -> usize {
    12
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            recommendations: default_recommendations(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.is_catalog_configured() {
            return Err(anyhow::anyhow!(
                "Catalog API key is not configured. Run 'watchtrack config catalog'"
            ));
        }
        if !self.is_backend_configured() {
            return Err(anyhow::anyhow!(
                "Backend is not configured. Run 'watchtrack config backend'"
            ));
        }
        if !self.backend.project_url.starts_with("http") {
            return Err(anyhow::anyhow!(
                "Backend project_url must be an http(s) URL: {}",
                self.backend.project_url
            ));
        }
        if self.ui.page_size == 0 {
            return Err(anyhow::anyhow!("ui.page_size must be positive"));
        }
        Ok(())
    }

    pub fn is_catalog_configured(&self) -> bool {
        !self.catalog.api_key.is_empty() && self.catalog.api_key != "YOUR_API_KEY"
    }

    pub fn is_backend_configured(&self) -> bool {
        !self.backend.project_url.is_empty()
            && self.backend.project_url != "YOUR_PROJECT_URL"
            && !self.backend.publishable_key.is_empty()
            && self.backend.publishable_key != "YOUR_PUBLISHABLE_KEY"
    }

    /// A starter config with placeholder values, written on first run.
    pub fn template() -> Self {
        Self {
            catalog: CatalogConfig {
                api_key: "YOUR_API_KEY".to_string(),
                base_url: default_catalog_base_url(),
                image_base_url: default_image_base_url(),
            },
            backend: BackendConfig {
                project_url: "YOUR_PROJECT_URL".to_string(),
                publishable_key: "YOUR_PUBLISHABLE_KEY".to_string(),
            },
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            catalog: CatalogConfig {
                api_key: "test_key".to_string(),
                base_url: default_catalog_base_url(),
                image_base_url: default_image_base_url(),
            },
            backend: BackendConfig {
                project_url: "https://proj.example.co".to_string(),
                publishable_key: "anon_key".to_string(),
            },
            ui: UiConfig::default(),
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.catalog.api_key, "test_key");
        assert_eq!(loaded.backend.project_url, "https://proj.example.co");
        assert_eq!(loaded.ui.page_size, 20);
        assert_eq!(loaded.ui.recommendations, 12);
    }

    #[test]
    fn test_validate_rejects_placeholders() {
        let mut config = Config::template();
        assert!(config.validate().is_err());
        assert!(!config.is_catalog_configured());

        config.catalog.api_key = "real_key".to_string();
        assert!(config.is_catalog_configured());
        assert!(config.validate().is_err());

        config.backend.project_url = "https://proj.example.co".to_string();
        config.backend.publishable_key = "anon_key".to_string();
        assert!(config.validate().is_ok());
        assert!(config.is_backend_configured());
    }

    #[test]
    fn test_validate_rejects_non_http_backend() {
        let mut config = Config::template();
        config.catalog.api_key = "real_key".to_string();
        config.backend.project_url = "proj.example.co".to_string();
        config.backend.publishable_key = "anon_key".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let toml_str = r#"
            [catalog]
            api_key = "k"

            [backend]
            project_url = "https://proj.example.co"
            publishable_key = "anon"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.catalog.image_base_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(config.ui.page_size, 20);
    }
}
