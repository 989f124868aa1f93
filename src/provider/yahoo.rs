use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use super::{FetchRequest, MarketDataProvider, RangeSpec};
use crate::error::FetchError;
use crate::model::bar::{RawBar, RawSeries, SourceTimestamp};
use crate::normalize::utc_from_unix;

/// Yahoo reports unknown or delisted symbols with this error code.
const NOT_FOUND_CODE: &str = "Not Found";

/// Client for Yahoo's public chart endpoint.
pub struct YahooChartClient {
    http: reqwest::Client,
    base_url: String,
}

impl YahooChartClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).context("invalid provider.user_agent")?,
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build Yahoo HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, ticker: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, ticker)
    }

    fn compact_error_body(body: &str) -> String {
        let normalized = body.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.chars().count() > 180 {
            let cut: String = normalized.chars().take(180).collect();
            format!("{}...", cut)
        } else {
            normalized
        }
    }

    async fn get_chart(&self, request: &FetchRequest) -> Result<RawSeries, FetchError> {
        let mut query: Vec<(&str, String)> =
            vec![("interval", request.interval.token().to_string())];
        match request.range {
            RangeSpec::Period(period) => query.push(("range", period.token().to_string())),
            RangeSpec::Explicit { start, end } => {
                query.push(("period1", start.timestamp().to_string()));
                query.push(("period2", end.timestamp().to_string()));
            }
        }

        let response = self
            .http
            .get(self.chart_url(&request.ticker))
            .query(&query)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<Value>(&body) {
            Ok(root) => parse_chart_response(&request.ticker, &root),
            Err(_) if !status.is_success() => Err(FetchError::Malformed(format!(
                "status {} {}",
                status,
                Self::compact_error_body(&body)
            ))),
            Err(e) => Err(FetchError::Json(e)),
        }
    }
}

impl MarketDataProvider for YahooChartClient {
    async fn fetch_bars(&self, request: &FetchRequest) -> Result<RawSeries, FetchError> {
        let started = Utc::now();
        let result = self.get_chart(request).await;
        tracing::debug!(
            ticker = %request.ticker,
            elapsed_ms = (Utc::now() - started).num_milliseconds(),
            ok = result.is_ok(),
            "yahoo chart request finished"
        );
        result
    }
}

/// Turns a `/v8/finance/chart` payload into bars.
///
/// Rows without a close are provider gaps and are skipped. A missing result or
/// a "Not Found" error yields an empty series.
pub fn parse_chart_response(ticker: &str, root: &Value) -> Result<RawSeries, FetchError> {
    let chart = root
        .get("chart")
        .ok_or_else(|| FetchError::Malformed("missing 'chart' object".to_string()))?;

    if let Some(error) = chart.get("error").filter(|e| !e.is_null()) {
        let code = error
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let description = error
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if code == NOT_FOUND_CODE {
            return Ok(RawSeries::new(ticker, Vec::new()));
        }
        return Err(FetchError::Provider { code, description });
    }

    let Some(result) = chart
        .get("result")
        .and_then(Value::as_array)
        .and_then(|r| r.first())
    else {
        return Ok(RawSeries::new(ticker, Vec::new()));
    };

    let timestamps = result
        .get("timestamp")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if timestamps.is_empty() {
        return Ok(RawSeries::new(ticker, Vec::new()));
    }

    let quote = result
        .get("indicators")
        .and_then(|i| i.get("quote"))
        .and_then(Value::as_array)
        .and_then(|q| q.first())
        .ok_or_else(|| FetchError::Malformed("missing indicators.quote".to_string()))?;
    let column = |name: &str| -> Vec<Value> {
        quote
            .get(name)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    };
    let opens = column("open");
    let highs = column("high");
    let lows = column("low");
    let closes = column("close");
    let volumes = column("volume");

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        let secs = ts
            .as_i64()
            .ok_or_else(|| FetchError::Malformed(format!("non-integer timestamp at row {}", i)))?;
        let Some(close) = closes.get(i).and_then(Value::as_f64) else {
            continue;
        };
        let open = opens.get(i).and_then(Value::as_f64).unwrap_or(close);
        let high = highs.get(i).and_then(Value::as_f64).unwrap_or(open.max(close));
        let low = lows.get(i).and_then(Value::as_f64).unwrap_or(open.min(close));
        let volume = volumes.get(i).and_then(Value::as_u64).unwrap_or(0);
        let utc = utc_from_unix(secs)
            .ok_or_else(|| FetchError::Malformed(format!("timestamp out of range: {}", secs)))?;
        bars.push(RawBar {
            timestamp: SourceTimestamp::Zoned(utc.fixed_offset()),
            open,
            high,
            low,
            close,
            volume,
        });
    }

    Ok(RawSeries::new(ticker, bars))
}
