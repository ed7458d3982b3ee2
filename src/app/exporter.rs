use crate::domain::model::OutputRow;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};

/// 序列化成 CSV；即使沒有資料列也會輸出標題列
pub fn to_csv(rows: &[OutputRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(OutputRow::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

/// Reads an exported artifact back into rows, matching columns by header.
pub fn parse_rows(data: &[u8]) -> Result<Vec<OutputRow>> {
    let mut reader = csv::Reader::from_reader(data);
    let rows: Vec<OutputRow> = reader
        .deserialize()
        .collect::<std::result::Result<_, _>>()?;
    Ok(rows)
}

/// 寫出 CSV，覆蓋同名舊檔
pub async fn export<S: Storage>(storage: &S, file_name: &str, rows: &[OutputRow]) -> Result<()> {
    let data = to_csv(rows)?;
    tracing::debug!("Writing {} rows ({} bytes) to {}", rows.len(), data.len(), file_name);

    storage.write_file(file_name, &data).await?;
    tracing::info!("💾 csv file ready! ({} rows)", rows.len());
    Ok(())
}
