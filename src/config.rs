use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::model::selection::{ChartType, Indicator, IndicatorSet, Interval, Period, Selection};
use crate::watchlist::{Watchlist, WatchlistEntry};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub watchlist: Vec<WatchlistEntry>,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub ticker: String,
    pub compare_ticker: String,
    pub period: String,
    pub interval: String,
    #[serde(default = "default_chart_type")]
    pub chart_type: String,
    #[serde(default)]
    pub indicators: Vec<String>,
    pub refresh_interval_secs: u64,
    pub display_timezone: String,
    pub export_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
    pub table_rows: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: PathBuf,
}

fn default_chart_type() -> String {
    "Candlestick".to_string()
}

/// Parse an IANA zone name such as "America/New_York" or "US/Eastern".
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.trim()
        .parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("invalid display_timezone '{}': {}", s, e))
}

impl DashboardConfig {
    pub fn display_zone(&self) -> Result<Tz> {
        parse_timezone(&self.display_timezone)
    }

    pub fn indicator_set(&self) -> Result<IndicatorSet> {
        let mut set = IndicatorSet::empty();
        for label in &self.indicators {
            set.insert(Indicator::parse(label)?);
        }
        Ok(set)
    }

    /// Initial selection bundle built from the configured defaults.
    pub fn initial_selection(&self) -> Result<Selection> {
        Ok(Selection {
            ticker: self.ticker.trim().to_ascii_uppercase(),
            compare_ticker: self.compare_ticker.trim().to_ascii_uppercase(),
            period: Period::parse(&self.period).context("dashboard.period is invalid")?,
            interval: Interval::parse(&self.interval).context("dashboard.interval is invalid")?,
            chart_type: ChartType::parse(&self.chart_type)
                .context("dashboard.chart_type is invalid")?,
            indicators: self
                .indicator_set()
                .context("dashboard.indicators is invalid")?,
        })
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = std::env::var("TICKER_DASHBOARD_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let mut config = Self::from_path(&config_path)?;

        if let Ok(url) = std::env::var("TICKER_DASHBOARD_PROVIDER_URL") {
            if !url.trim().is_empty() {
                config.provider.base_url = url.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&config_str).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn watchlist(&self) -> Watchlist {
        Watchlist::from_entries(self.watchlist.clone())
    }

    pub fn validate(&self) -> Result<()> {
        if self.dashboard.refresh_interval_secs == 0 {
            bail!("dashboard.refresh_interval_secs must be > 0");
        }
        if self.ui.refresh_rate_ms == 0 {
            bail!("ui.refresh_rate_ms must be > 0");
        }
        self.dashboard.display_zone()?;
        let selection = self.dashboard.initial_selection()?;
        let watchlist = self.watchlist();
        if !watchlist.contains(&selection.ticker) {
            bail!(
                "dashboard.ticker '{}' is not in the watchlist",
                selection.ticker
            );
        }
        if !watchlist.contains(&selection.compare_ticker) {
            bail!(
                "dashboard.compare_ticker '{}' is not in the watchlist",
                selection.compare_ticker
            );
        }
        Ok(())
    }
}
