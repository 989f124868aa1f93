use std::path::Path;

use chrono_tz::America::New_York;
use ticker_dashboard::config::{parse_timezone, Config};
use ticker_dashboard::model::selection::{ChartType, Interval, Period};

#[test]
fn bundled_default_config_is_valid() {
    let config = Config::from_path(Path::new("config/default.toml")).expect("default config");
    config.validate().expect("default config validates");

    assert_eq!(config.provider.base_url, "https://query2.finance.yahoo.com");
    assert_eq!(config.dashboard.refresh_interval_secs, 20);
    assert_eq!(config.dashboard.display_zone().unwrap(), New_York);

    let selection = config.dashboard.initial_selection().unwrap();
    assert_eq!(selection.ticker, "AAPL");
    assert_eq!(selection.compare_ticker, "MSFT");
    assert_eq!(selection.period, Period::OneDay);
    assert_eq!(selection.interval, Interval::OneMinute);
    assert_eq!(selection.chart_type, ChartType::Candlestick);
    assert!(selection.indicators.is_empty());

    let watchlist = config.watchlist();
    assert_eq!(watchlist.len(), 13);
    assert_eq!(watchlist.display_name("RELIANCE.NS"), "Reliance Industries Limited");
}

#[test]
fn tickers_outside_watchlist_are_rejected() {
    let toml_str = r#"
[provider]
base_url = "https://query2.finance.yahoo.com"
user_agent = "test"

[dashboard]
ticker = "AAPL"
compare_ticker = "ZZZZ"
period = "1mo"
interval = "1d"
refresh_interval_secs = 20
display_timezone = "America/New_York"
export_dir = "."

[[watchlist]]
symbol = "AAPL"
name = "Apple Inc."

[ui]
refresh_rate_ms = 100
table_rows = 10

[logging]
level = "info"
file = "ticker-dashboard.log"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.watchlist().len(), 1);
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("ZZZZ"));
}

#[test]
fn bad_selector_tokens_are_rejected() {
    let mut config = Config::from_path(Path::new("config/default.toml")).unwrap();
    config.dashboard.interval = "7m".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::from_path(Path::new("config/default.toml")).unwrap();
    config.dashboard.indicators = vec!["Bollinger".to_string()];
    assert!(config.validate().is_err());
}

#[test]
fn parse_timezone_accepts_iana_names() {
    assert_eq!(parse_timezone(" US/Eastern ").unwrap().name(), "US/Eastern");
    assert!(parse_timezone("Nowhere/Special").is_err());
}
