use crate::dashboard::DashboardSnapshot;

#[derive(Debug, Clone)]
pub enum AppEvent {
    RefreshStarted { ticker: String },
    Snapshot(Box<DashboardSnapshot>),
    LogMessage(String),
    Error(String),
}
