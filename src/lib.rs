pub mod config;
pub mod dashboard;
pub mod enrich;
pub mod error;
pub mod event;
pub mod export;
pub mod indicator;
pub mod input;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod refresh;
pub mod ui;
pub mod watchlist;
