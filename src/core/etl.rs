use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// 依序執行 extract → transform → load，回傳輸出檔路徑
    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting ETL process...");
        self.monitor.log_stats("Start");

        // Extract: 地名解析 + 飯店清單
        let venues = self.pipeline.extract().await?;
        tracing::info!("Extracted {} hotels", venues.len());
        self.monitor.log_stats("Extract");

        // Transform: 抓評論並攤平
        let report = self.pipeline.transform(venues).await?;
        tracing::info!(
            "Transformed {} hotels into {} rows",
            report.venue_count - report.failed_venues.len(),
            report.rows.len()
        );
        if !report.failed_venues.is_empty() {
            tracing::warn!(
                "{} hotels were left out of the export",
                report.failed_venues.len()
            );
        }
        self.monitor.log_stats("Transform");

        // Load
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
