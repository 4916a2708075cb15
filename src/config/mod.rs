use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Configuration {
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
    #[serde(rename = "sessionFile", default = "default_session_file")]
    pub session_file: PathBuf,
}

/// The review backend the account, watchlist, and review commands talk to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
}

/// The external movie catalog used for search and detail lookups.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(rename = "baseUrl", default = "default_catalog_base")]
    pub base_url: String,
    #[serde(rename = "apikey")]
    pub api_key: String,
}

fn default_session_file() -> PathBuf {
    PathBuf::from("session.json")
}

fn default_catalog_base() -> String {
    "https://www.omdbapi.com".to_string()
}

impl Configuration {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Configuration = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        Url::parse(&self.api.base_url)
            .with_context(|| format!("invalid api.baseUrl: {}", self.api.base_url))?;
        Url::parse(&self.catalog.base_url)
            .with_context(|| format!("invalid catalog.baseUrl: {}", self.catalog.base_url))?;
        Ok(())
    }
}
