#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_PLACE_NAME: &str = "Makkah";
pub const DEFAULT_OUTPUT_FILE: &str = "hotels.csv";

/// 整個批次作業的設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub load: LoadConfig,
    #[serde(default)]
    pub error_handling: ErrorHandlingConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_host: String,
    pub timeout_seconds: Option<u64>,
}

// 不要把 API key 印進日誌
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("api_host", &self.api_host)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Fixed query parameters for the three provider endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub place_name: String,
    pub locale: String,
    pub currency: String,
    pub adults_number: u32,
    pub room_number: u32,
    pub checkin_date: String,
    pub checkout_date: String,
    pub units: String,
    pub dest_type: String,
    pub order_by: String,
    pub review_sort: String,
    pub max_hotels: usize,
    pub max_reviews: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            place_name: DEFAULT_PLACE_NAME.to_string(),
            locale: "en-gb".to_string(),
            currency: "AED".to_string(),
            adults_number: 2,
            room_number: 1,
            checkin_date: "2023-07-15".to_string(),
            checkout_date: "2023-07-16".to_string(),
            units: "metric".to_string(),
            dest_type: "city".to_string(),
            order_by: "popularity".to_string(),
            review_sort: "SORT_MOST_RELEVANT".to_string(),
            max_hotels: 20,
            max_reviews: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path().to_string_lossy().into_owned(),
        }
    }
}

impl LoadConfig {
    /// 輸出檔所在目錄，交給 `LocalStorage` 當根目錄
    pub fn output_dir(&self) -> PathBuf {
        match Path::new(&self.output_path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn file_name(&self) -> String {
        Path::new(&self.output_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string())
    }
}

/// 執行檔所在目錄下的 `hotels.csv`，取不到時退回目前目錄
fn default_output_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_OUTPUT_FILE)
}

/// What the location and listing stages do when the provider call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run with the underlying error.
    #[default]
    Abort,
    /// Log the error and continue with no data, producing a header-only export.
    Degrade,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorHandlingConfig {
    pub on_api_failure: FailurePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// 同時進行的評論請求數，1 代表逐一抓取
    pub concurrent_requests: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            concurrent_requests: 1,
        }
    }
}

impl AppConfig {
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            search: SearchConfig::default(),
            load: LoadConfig::default(),
            error_handling: ErrorHandlingConfig::default(),
            performance: PerformanceConfig::default(),
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RAPID_API_KEY})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_non_empty_string("api.api_key", &self.api.api_key)?;
        validation::validate_non_empty_string("api.api_host", &self.api.api_host)?;
        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_positive_number("api.timeout_seconds", timeout as usize, 1)?;
        }

        validation::validate_non_empty_string("search.place_name", &self.search.place_name)?;
        validation::validate_stay(&self.search.checkin_date, &self.search.checkout_date)?;
        validation::validate_positive_number("search.max_hotels", self.search.max_hotels, 1)?;
        validation::validate_positive_number("search.max_reviews", self.search.max_reviews, 1)?;

        validation::validate_path("load.output_path", &self.load.output_path)?;

        validation::validate_positive_number(
            "performance.concurrent_requests",
            self.performance.concurrent_requests,
            1,
        )?;

        Ok(())
    }
}
