pub mod chart;
pub mod dashboard;
pub mod tables;

use chrono::{DateTime, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::dashboard::{DashboardSnapshot, Section};
use crate::event::AppEvent;
use crate::input::UiCommand;
use crate::model::selection::{cycle_next, Indicator, Interval, Period, Selection};
use crate::refresh::seconds_until_refresh;
use crate::watchlist::Watchlist;

use chart::{ComparisonChart, MacdChart, PriceChart, RsiChart};
use dashboard::{
    AboutPanel, ControlsPanel, KeybindBar, LogPanel, MetricsPanel, NoticePanel, StatusBar,
    WatchlistPanel,
};
use tables::{DataTable, TableTab};

const MAX_LOG_MESSAGES: usize = 200;
const SIDEBAR_WIDTH: u16 = 44;
const DEFAULT_TABLE_ROWS: usize = 10;

/// What the main loop has to do after a command was applied to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEffect {
    None,
    SelectionChanged,
    RefreshRequested,
    ExportRequested,
    Quit,
}

pub struct AppState {
    pub selection: Selection,
    pub watchlist: Watchlist,
    pub refresh_interval_secs: u64,
    pub snapshot: Option<DashboardSnapshot>,
    pub refreshing: bool,
    pub table_tab: TableTab,
    /// Data rows shown in the table below the charts.
    pub table_rows: usize,
    pub log_messages: Vec<String>,
}

impl AppState {
    pub fn new(selection: Selection, watchlist: Watchlist, refresh_interval_secs: u64) -> Self {
        Self {
            selection,
            watchlist,
            refresh_interval_secs,
            snapshot: None,
            refreshing: false,
            table_tab: TableTab::default(),
            table_rows: DEFAULT_TABLE_ROWS,
            log_messages: Vec::new(),
        }
    }

    pub fn push_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.snapshot.as_ref().map(|s| s.started_at)
    }

    pub fn countdown_secs(&self, now: DateTime<Utc>) -> u64 {
        seconds_until_refresh(self.last_refresh(), self.refresh_interval_secs, now)
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::RefreshStarted { ticker } => {
                self.refreshing = true;
                tracing::debug!(ticker = %ticker, "refresh started");
            }
            AppEvent::Snapshot(snapshot) => {
                self.refreshing = false;
                for notice in snapshot.notices() {
                    self.push_log(notice);
                }
                self.snapshot = Some(*snapshot);
            }
            AppEvent::LogMessage(msg) => {
                self.push_log(msg);
            }
            AppEvent::Error(msg) => {
                self.push_log(format!("[ERR] {}", msg));
            }
        }
    }

    pub fn handle_command(&mut self, cmd: UiCommand) -> CommandEffect {
        let s = &mut self.selection;
        match cmd {
            UiCommand::NextTicker => s.ticker = self.watchlist.step_symbol(&s.ticker, 1),
            UiCommand::PrevTicker => s.ticker = self.watchlist.step_symbol(&s.ticker, -1),
            UiCommand::NextCompareTicker => {
                s.compare_ticker = self.watchlist.step_symbol(&s.compare_ticker, 1)
            }
            UiCommand::PrevCompareTicker => {
                s.compare_ticker = self.watchlist.step_symbol(&s.compare_ticker, -1)
            }
            UiCommand::CyclePeriod => s.period = cycle_next(&Period::ALL, s.period),
            UiCommand::CycleInterval => s.interval = cycle_next(&Interval::ALL, s.interval),
            UiCommand::ToggleChartType => s.chart_type = s.chart_type.toggled(),
            UiCommand::ToggleIndicator(indicator) => s.indicators.toggle(indicator),
            UiCommand::SwitchTableTab => {
                self.table_tab = self.table_tab.toggled();
                return CommandEffect::None;
            }
            UiCommand::ExportCsv => return CommandEffect::ExportRequested,
            UiCommand::RefreshNow => return CommandEffect::RefreshRequested,
            UiCommand::Quit => return CommandEffect::Quit,
        }
        CommandEffect::SelectionChanged
    }
}

fn render_main_column(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(snapshot) = state.snapshot.as_ref() else {
        frame.render_widget(NoticePanel::loading(" Dashboard "), area);
        return;
    };
    let sel = &state.selection;
    let shown_rsi = sel.indicators.contains(Indicator::Rsi);
    let shown_macd = sel.indicators.contains(Indicator::Macd);
    let comparison = snapshot.comparison.ready();

    let Section::Ready(primary) = &snapshot.primary else {
        let mut constraints = vec![Constraint::Length(5)];
        if comparison.is_some() {
            constraints.push(Constraint::Min(10));
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        frame.render_widget(NoticePanel::new(" Dashboard ", &snapshot.primary), rows[0]);
        if let Some(cmp) = comparison {
            frame.render_widget(ComparisonChart::new(None, cmp), rows[1]);
        }
        return;
    };

    let mut constraints = vec![
        Constraint::Length(4), // metrics
        Constraint::Min(10),   // price chart
    ];
    if shown_rsi {
        constraints.push(Constraint::Length(8));
    }
    if shown_macd {
        constraints.push(Constraint::Length(8));
    }
    if comparison.is_some() {
        constraints.push(Constraint::Length(10));
    }
    // header and borders take three lines
    let table_height = u16::try_from(state.table_rows.saturating_add(3)).unwrap_or(u16::MAX);
    constraints.push(Constraint::Length(table_height));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    let mut take = || {
        let r = rows[next];
        next += 1;
        r
    };

    frame.render_widget(MetricsPanel::new(&primary.name, &primary.metrics), take());
    frame.render_widget(
        PriceChart::new(primary, snapshot.selection.period)
            .chart_type(sel.chart_type)
            .indicators(sel.indicators),
        take(),
    );
    if shown_rsi {
        frame.render_widget(RsiChart::new(&primary.data), take());
    }
    if shown_macd {
        frame.render_widget(MacdChart::new(&primary.data), take());
    }
    if let Some(cmp) = comparison {
        frame.render_widget(ComparisonChart::new(Some(primary), cmp), take());
    }
    frame.render_widget(DataTable::new(&primary.data, state.table_tab), take());
}

fn render_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // controls
            Constraint::Min(5),    // quotes
            Constraint::Length(6), // about
        ])
        .split(area);

    frame.render_widget(ControlsPanel::new(&state.selection), rows[0]);
    match state.snapshot.as_ref() {
        Some(snapshot) => frame.render_widget(WatchlistPanel::new(&snapshot.quotes), rows[1]),
        None => frame.render_widget(NoticePanel::loading(" Real-Time Stock Prices "), rows[1]),
    }
    frame.render_widget(AboutPanel, rows[2]);
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(12),   // main area
            Constraint::Length(5), // system log
            Constraint::Length(1), // keybinds
        ])
        .split(frame.area());

    frame.render_widget(
        StatusBar {
            selection: &state.selection,
            refreshing: state.refreshing,
            countdown_secs: state.countdown_secs(Utc::now()),
        },
        outer[0],
    );

    let main_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(60), Constraint::Length(SIDEBAR_WIDTH)])
        .split(outer[1]);
    render_main_column(frame, main_area[0], state);
    render_sidebar(frame, main_area[1], state);

    frame.render_widget(LogPanel::new(&state.log_messages), outer[2]);
    frame.render_widget(KeybindBar, outer[3]);
}
