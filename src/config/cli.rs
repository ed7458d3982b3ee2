use crate::config::{ApiConfig, AppConfig, FailurePolicy};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use clap::Parser;
use std::path::PathBuf;

/// 命令列參數；不帶任何參數時執行預設情境（Makkah）
#[derive(Debug, Clone, Parser)]
#[command(name = "hotel-reviews-etl")]
#[command(about = "Export hotels and their most relevant reviews for a city to CSV")]
pub struct CliArgs {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, env = "RAPID_API_URL")]
    pub api_url: Option<String>,

    #[arg(long, env = "RAPID_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "RAPID_API_HOST")]
    pub api_host: Option<String>,

    /// Place name to resolve (defaults to Makkah)
    #[arg(long)]
    pub place: Option<String>,

    /// Output CSV path (defaults to hotels.csv next to the executable)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Number of review requests in flight
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Keep going with no data when the location or hotel search fails
    #[arg(long)]
    pub degrade: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliArgs {
    /// 合併設定來源：命令列與環境變數 > 設定檔 > 預設值
    pub fn into_config(self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                AppConfig::from_file(path)?
            }
            None => {
                let base_url = validate_required_field("RAPID_API_URL", &self.api_url)?;
                AppConfig::new(ApiConfig {
                    base_url: base_url.clone(),
                    api_key: String::new(),
                    api_host: String::new(),
                    timeout_seconds: None,
                })
            }
        };

        if let Some(url) = self.api_url {
            config.api.base_url = url;
        }
        if let Some(key) = self.api_key {
            config.api.api_key = key;
        }
        if let Some(host) = self.api_host {
            config.api.api_host = host;
        }
        if let Some(place) = self.place {
            config.search.place_name = place;
        }
        if let Some(output) = self.output {
            config.load.output_path = output;
        }
        if let Some(concurrency) = self.concurrency {
            config.performance.concurrent_requests = concurrency;
        }
        if self.degrade {
            config.error_handling.on_api_failure = FailurePolicy::Degrade;
        }

        Ok(config)
    }
}
