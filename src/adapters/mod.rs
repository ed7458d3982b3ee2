// Adapters layer: 外部系統的具體實作（provider HTTP client、本地檔案存儲）

pub mod http;
pub mod storage;
