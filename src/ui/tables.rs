use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use crate::enrich::EnrichedSeries;
use crate::export::DATETIME_FORMAT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableTab {
    #[default]
    History,
    Indicators,
}

impl TableTab {
    pub fn toggled(self) -> Self {
        match self {
            TableTab::History => TableTab::Indicators,
            TableTab::Indicators => TableTab::History,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TableTab::History => " Historical Data ",
            TableTab::Indicators => " Technical Indicators ",
        }
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "---".to_string())
}

/// Most recent rows of the enriched table, newest last.
pub struct DataTable<'a> {
    data: &'a EnrichedSeries,
    tab: TableTab,
}

impl<'a> DataTable<'a> {
    pub fn new(data: &'a EnrichedSeries, tab: TableTab) -> Self {
        Self { data, tab }
    }

    fn header(&self) -> Row<'static> {
        let names: &[&str] = match self.tab {
            TableTab::History => &["Datetime", "Open", "High", "Low", "Close", "Volume"],
            TableTab::Indicators => &["Datetime", "SMA_20", "EMA_20", "RSI", "MACD", "MACD_Signal"],
        };
        Row::new(names.iter().map(|n| Cell::from(*n))).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    }

    fn row(&self, i: usize) -> Row<'static> {
        let bar = &self.data.series.bars[i];
        let stamp = bar.datetime.format(DATETIME_FORMAT).to_string();
        let cells = match self.tab {
            TableTab::History => vec![
                stamp,
                format!("{:.2}", bar.open),
                format!("{:.2}", bar.high),
                format!("{:.2}", bar.low),
                format!("{:.2}", bar.close),
                bar.volume.to_string(),
            ],
            TableTab::Indicators => {
                let cols = &self.data.indicators;
                vec![
                    stamp,
                    fmt_opt(cols.sma_20[i]),
                    fmt_opt(cols.ema_20[i]),
                    fmt_opt(cols.rsi_14[i]),
                    fmt_opt(cols.macd[i]),
                    fmt_opt(cols.macd_signal[i]),
                ]
            }
        };
        Row::new(cells)
    }
}

impl Widget for DataTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // borders + header
        let visible_rows = area.height.saturating_sub(3) as usize;
        let start = self.data.len().saturating_sub(visible_rows);
        let rows: Vec<Row> = (start..self.data.len()).map(|i| self.row(i)).collect();

        let title = format!(
            "{}({} rows, Tab to switch) ",
            self.tab.title(),
            self.data.len()
        );
        let widths = [
            Constraint::Length(26),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(12),
        ];
        Table::new(rows, widths)
            .header(self.header())
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}
