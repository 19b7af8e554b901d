use crate::core::query::{DEFAULT_DEPTH, DEFAULT_PAGE_SIZE, UNIVERSITY_LIMIT};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://homeseek-cms.vercel.app/api";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinderConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub university_limit: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_seconds: None,
            university_limit: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingConfig {
    pub page_size: Option<u32>,
    pub depth: Option<u32>,
}

impl FinderConfig {
    /// Loads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FinderError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FinderError::Config {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for FinderConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        if let Some(page_size) = self.listing.page_size {
            validate_positive_number("listing.page_size", page_size as usize, 1)?;
        }
        if let Some(timeout) = self.api.timeout_seconds {
            validate_positive_number("api.timeout_seconds", timeout as usize, 1)?;
        }
        if let Some(limit) = self.api.university_limit {
            validate_positive_number("api.university_limit", limit as usize, 1)?;
        }
        Ok(())
    }
}

impl ConfigProvider for FinderConfig {
    fn api_base(&self) -> &str {
        &self.api.base_url
    }

    fn page_size(&self) -> u32 {
        self.listing.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn depth(&self) -> u32 {
        self.listing.depth.unwrap_or(DEFAULT_DEPTH)
    }

    fn university_limit(&self) -> u32 {
        self.api.university_limit.unwrap_or(UNIVERSITY_LIMIT)
    }

    fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}
