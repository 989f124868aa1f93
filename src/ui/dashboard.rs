use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::dashboard::{Section, WatchlistQuote};
use crate::metrics::{format_volume, SummaryMetrics};
use crate::model::selection::{Indicator, Selection};

const ABOUT_TEXT: &str = "This dashboard provides stock data and technical indicators for \
various time periods. Use the key bindings to customize your view.";

fn change_color(val: f64) -> Color {
    if val > 0.0 {
        Color::Green
    } else if val < 0.0 {
        Color::Red
    } else {
        Color::White
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Headline price with window change, then high/low/volume.
pub struct MetricsPanel<'a> {
    name: &'a str,
    metrics: &'a SummaryMetrics,
}

impl<'a> MetricsPanel<'a> {
    pub fn new(name: &'a str, metrics: &'a SummaryMetrics) -> Self {
        Self { name, metrics }
    }
}

impl Widget for MetricsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let m = self.metrics;
        let label = Style::default().fg(Color::DarkGray);
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{} Last Price: ", self.name), label),
                Span::styled(
                    format!("{:.2} USD", m.last_close),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {:.2} ({:.2}%)", m.change, m.pct_change),
                    Style::default().fg(change_color(m.change)),
                ),
            ]),
            Line::from(vec![
                Span::styled("High: ", label),
                Span::styled(format!("{:.2} USD", m.high), Style::default().fg(Color::White)),
                Span::styled("   Low: ", label),
                Span::styled(format!("{:.2} USD", m.low), Style::default().fg(Color::White)),
                Span::styled("   Volume: ", label),
                Span::styled(format_volume(m.volume), Style::default().fg(Color::White)),
            ]),
        ];
        Paragraph::new(lines)
            .block(panel(" Metrics "))
            .render(area, buf);
    }
}

/// Current parameter values with the key that changes each one.
pub struct ControlsPanel<'a> {
    selection: &'a Selection,
}

impl<'a> ControlsPanel<'a> {
    pub fn new(selection: &'a Selection) -> Self {
        Self { selection }
    }
}

impl Widget for ControlsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let s = self.selection;
        let key = Style::default().fg(Color::Yellow);
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::Cyan);
        let row = |k: &'static str, name: &'static str, v: String| {
            Line::from(vec![
                Span::styled(k, key),
                Span::styled(name, label),
                Span::styled(v, value),
            ])
        };

        let mut lines = vec![
            row("[t] ", "Ticker:   ", s.ticker.clone()),
            row("[p] ", "Period:   ", s.period.to_string()),
            row("[i] ", "Interval: ", s.interval.to_string()),
            row("[k] ", "Chart:    ", s.chart_type.label().to_string()),
            row("[c] ", "Compare:  ", s.compare_ticker.clone()),
        ];
        let toggles: Vec<Span> = Indicator::ALL
            .iter()
            .enumerate()
            .map(|(i, ind)| {
                let on = s.indicators.contains(*ind);
                Span::styled(
                    format!("{}:{} ", i + 1, ind.label()),
                    if on {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    } else {
                        label
                    },
                )
            })
            .collect();
        lines.push(Line::from(toggles));

        Paragraph::new(lines)
            .block(panel(" Chart Parameters "))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Sidebar of intraday quotes, one line per watchlist symbol.
pub struct WatchlistPanel<'a> {
    quotes: &'a [WatchlistQuote],
}

impl<'a> WatchlistPanel<'a> {
    pub fn new(quotes: &'a [WatchlistQuote]) -> Self {
        Self { quotes }
    }
}

impl Widget for WatchlistPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .quotes
            .iter()
            .map(|q| {
                let name = Span::styled(
                    format!("{:<12}", q.symbol),
                    Style::default().fg(Color::White),
                );
                match &q.quote {
                    Section::Ready(quote) => Line::from(vec![
                        name,
                        Span::styled(
                            format!("{:>10.2}", quote.last_price),
                            Style::default().fg(Color::White),
                        ),
                        Span::styled(
                            format!(" {:+.2} ({:+.2}%)", quote.change, quote.pct_change),
                            Style::default().fg(change_color(quote.change)),
                        ),
                    ]),
                    Section::NoData { .. } => Line::from(vec![
                        name,
                        Span::styled("    no data", Style::default().fg(Color::DarkGray)),
                    ]),
                    Section::Failed { .. } => Line::from(vec![
                        name,
                        Span::styled("      error", Style::default().fg(Color::Red)),
                    ]),
                }
            })
            .collect();

        Paragraph::new(lines)
            .block(panel(" Real-Time Stock Prices "))
            .render(area, buf);
    }
}

pub struct AboutPanel;

impl Widget for AboutPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(ABOUT_TEXT)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .block(panel(" About "))
            .render(area, buf);
    }
}

/// Shown in place of a section whose fetch produced nothing.
pub struct NoticePanel<'a> {
    title: &'a str,
    message: String,
    is_error: bool,
}

impl<'a> NoticePanel<'a> {
    pub fn new<T>(title: &'a str, section: &Section<T>) -> Self {
        let is_error = matches!(section, Section::Failed { .. });
        let message = section
            .notice()
            .unwrap_or_else(|| "Loading...".to_string());
        Self {
            title,
            message,
            is_error,
        }
    }

    pub fn loading(title: &'a str) -> Self {
        Self {
            title,
            message: "Loading...".to_string(),
            is_error: false,
        }
    }
}

impl Widget for NoticePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = if self.is_error {
            Color::Red
        } else {
            Color::Yellow
        };
        Paragraph::new(self.message)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(panel(self.title))
            .render(area, buf);
    }
}

pub struct LogPanel<'a> {
    messages: &'a [String],
}

impl<'a> LogPanel<'a> {
    pub fn new(messages: &'a [String]) -> Self {
        Self { messages }
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.messages.len().saturating_sub(visible);
        let lines: Vec<Line> = self.messages[start..]
            .iter()
            .map(|msg| {
                let color = if msg.starts_with("[ERR]") {
                    Color::Red
                } else if msg.starts_with("[WARN]") {
                    Color::Yellow
                } else {
                    Color::Gray
                };
                Line::from(Span::styled(msg.as_str(), Style::default().fg(color)))
            })
            .collect();
        Paragraph::new(lines)
            .block(panel(" System Log "))
            .render(area, buf);
    }
}

pub struct StatusBar<'a> {
    pub selection: &'a Selection,
    pub refreshing: bool,
    pub countdown_secs: u64,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let refresh = if self.refreshing {
            Span::styled(" REFRESHING ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(
                format!(" Auto-refresh in {} seconds ", self.countdown_secs),
                Style::default().fg(Color::Green),
            )
        };

        let line = Line::from(vec![
            Span::styled(
                " Real Time Stock Dashboard ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.selection.ticker.as_str(), Style::default().fg(Color::Cyan)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} / {}", self.selection.period, self.selection.interval),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(" |", Style::default().fg(Color::DarkGray)),
            refresh,
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

pub struct KeybindBar;

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key = Style::default().fg(Color::Yellow);
        let text = Style::default().fg(Color::DarkGray);
        let line = Line::from(vec![
            Span::styled(" [T]", key),
            Span::styled("icker  ", text),
            Span::styled("[C]", key),
            Span::styled("ompare  ", text),
            Span::styled("[P]", key),
            Span::styled("eriod  ", text),
            Span::styled("[I]", key),
            Span::styled("nterval  ", text),
            Span::styled("[K]", key),
            Span::styled(" chart  ", text),
            Span::styled("[1-4]", key),
            Span::styled(" indicators  ", text),
            Span::styled("[Tab]", key),
            Span::styled(" table  ", text),
            Span::styled("[E]", key),
            Span::styled("xport  ", text),
            Span::styled("[R]", key),
            Span::styled("efresh  ", text),
            Span::styled("[Q]", key),
            Span::styled("uit", text),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}
