use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::enrich::EnrichedSeries;

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";
const PRICE_COLUMNS: [&str; 6] = ["Datetime", "Open", "High", "Low", "Close", "Volume"];

/// `{ticker}_data.csv`
pub fn export_file_name(ticker: &str) -> String {
    format!("{}_data.csv", ticker)
}

/// Warm-up and non-finite values both become empty fields.
fn format_optional(value: Option<f64>) -> String {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.to_string())
        .unwrap_or_default()
}

/// Serializes the enriched table: timestamp, OHLCV, then every indicator
/// column.
pub fn to_csv_bytes(data: &EnrichedSeries) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let named = data.indicators.named();

    let mut header: Vec<&str> = PRICE_COLUMNS.to_vec();
    header.extend(named.iter().map(|(name, _)| *name));
    writer.write_record(&header)?;

    for (i, bar) in data.series.bars.iter().enumerate() {
        let mut record = vec![
            bar.datetime.format(DATETIME_FORMAT).to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
        ];
        record.extend(
            named
                .iter()
                .map(|(_, column)| format_optional(column.get(i).copied().flatten())),
        );
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV buffer: {}", e.error()))
}

/// Writes `{ticker}_data.csv` into `dir` and returns the full path.
pub fn write_csv(dir: &Path, data: &EnrichedSeries) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export dir {}", dir.display()))?;
    let path = dir.join(export_file_name(&data.series.ticker));
    let bytes = to_csv_bytes(data)?;
    std::fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(
        ticker = %data.series.ticker,
        rows = data.len(),
        path = %path.display(),
        "exported CSV"
    );
    Ok(path)
}
