use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use crate::dashboard::{ComparisonView, PrimaryView};
use crate::enrich::EnrichedSeries;
use crate::model::bar::PriceSeries;
use crate::model::selection::{ChartType, Indicator, IndicatorSet, Period};

const AXIS_TIME_FORMAT: &str = "%m-%d %H:%M";
const SMA_COLOR: Color = Color::Yellow;
const EMA_COLOR: Color = Color::Magenta;

/// `(x, y)` pairs for the defined, finite values of a column.
fn points(values: &[Option<f64>]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|v| v.is_finite()).map(|v| (i as f64, v)))
        .collect()
}

/// Padded y-range over every dataset, `None` when nothing is finite.
fn y_bounds(sets: &[&[(f64, f64)]]) -> Option<[f64; 2]> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for set in sets {
        for &(_, y) in set.iter() {
            lo = lo.min(y);
            hi = hi.max(y);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let pad = ((hi - lo) * 0.05).max(0.01);
    Some([lo - pad, hi + pad])
}

fn y_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    vec![
        Span::raw(format!("{:.2}", bounds[0])),
        Span::raw(format!("{:.2}", mid)),
        Span::raw(format!("{:.2}", bounds[1])),
    ]
}

fn time_labels(series: &PriceSeries) -> Vec<Span<'static>> {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => vec![
            Span::raw(first.datetime.format(AXIS_TIME_FORMAT).to_string()),
            Span::raw(last.datetime.format(AXIS_TIME_FORMAT).to_string()),
        ],
        _ => Vec::new(),
    }
}

fn bordered(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Main price chart, candlestick or line, with SMA/EMA overlays.
pub struct PriceChart<'a> {
    view: &'a PrimaryView,
    period: Period,
    chart_type: ChartType,
    indicators: IndicatorSet,
}

impl<'a> PriceChart<'a> {
    pub fn new(view: &'a PrimaryView, period: Period) -> Self {
        Self {
            view,
            period,
            chart_type: ChartType::Candlestick,
            indicators: IndicatorSet::empty(),
        }
    }

    pub fn chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    pub fn indicators(mut self, indicators: IndicatorSet) -> Self {
        self.indicators = indicators;
        self
    }

    fn title(&self) -> String {
        format!(
            " {} {} Chart ",
            self.view.name,
            self.period.token().to_uppercase()
        )
    }

    fn overlays(&self) -> Vec<(&'static str, &'a [Option<f64>], Color)> {
        let cols = &self.view.data.indicators;
        let mut out = Vec::new();
        if self.indicators.contains(Indicator::Sma20) {
            out.push((Indicator::Sma20.label(), cols.sma_20.as_slice(), SMA_COLOR));
        }
        if self.indicators.contains(Indicator::Ema20) {
            out.push((Indicator::Ema20.label(), cols.ema_20.as_slice(), EMA_COLOR));
        }
        out
    }

    fn render_line(&self, area: Rect, buf: &mut Buffer) {
        let data = &self.view.data;
        let close = points(&data.series.closes().into_iter().map(Some).collect::<Vec<_>>());
        let overlays: Vec<(&str, Vec<(f64, f64)>, Color)> = self
            .overlays()
            .into_iter()
            .map(|(name, col, color)| (name, points(col), color))
            .collect();

        let mut sets: Vec<&[(f64, f64)]> = vec![close.as_slice()];
        sets.extend(overlays.iter().map(|(_, p, _)| p.as_slice()));
        let Some(bounds) = y_bounds(&sets) else {
            bordered(self.title()).render(area, buf);
            return;
        };

        let mut datasets = vec![Dataset::default()
            .name("Close Price")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&close)];
        for (name, pts, color) in &overlays {
            datasets.push(
                Dataset::default()
                    .name(*name)
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(*color))
                    .data(pts),
            );
        }

        let max_x = (data.len().saturating_sub(1)).max(1) as f64;
        Chart::new(datasets)
            .block(bordered(self.title()))
            .x_axis(
                Axis::default()
                    .title("Time")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, max_x])
                    .labels(time_labels(&data.series)),
            )
            .y_axis(
                Axis::default()
                    .title("Price (USD)")
                    .style(Style::default().fg(Color::Gray))
                    .bounds(bounds)
                    .labels(y_labels(bounds)),
            )
            .render(area, buf);
    }

    fn render_candles(&self, area: Rect, buf: &mut Buffer) {
        let block = bordered(self.title());
        let inner = block.inner(area);
        block.render(area, buf);

        let data: &EnrichedSeries = &self.view.data;
        if data.is_empty() || inner.height < 3 || inner.width < 4 {
            return;
        }

        let chart_height = inner.height.saturating_sub(1) as usize; // leave 1 row for axis labels
        let chart_width = inner.width as usize;
        let start = data.len().saturating_sub(chart_width);
        let visible = &data.series.bars[start..];
        let overlays: Vec<(&[Option<f64>], Color)> = self
            .overlays()
            .into_iter()
            .map(|(_, col, color)| (&col[start..], color))
            .collect();

        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for bar in visible {
            if bar.low.is_finite() {
                lo = lo.min(bar.low);
            }
            if bar.high.is_finite() {
                hi = hi.max(bar.high);
            }
        }
        for (col, _) in &overlays {
            for v in col.iter().flatten().filter(|v| v.is_finite()) {
                lo = lo.min(*v);
                hi = hi.max(*v);
            }
        }
        if !lo.is_finite() || !hi.is_finite() {
            return;
        }
        let range = if hi - lo < 0.01 { 1.0 } else { hi - lo };
        let row_of = |price: f64| -> u16 {
            let normalized = ((price - lo) / range).clamp(0.0, 1.0);
            let offset = (normalized * (chart_height - 1) as f64).round() as usize;
            inner.y + (chart_height - 1 - offset.min(chart_height - 1)) as u16
        };

        for (i, bar) in visible.iter().enumerate() {
            if !(bar.open.is_finite() && bar.close.is_finite()) {
                continue;
            }
            let x = inner.x + i as u16;
            let color = if bar.is_bullish() {
                Color::Green
            } else {
                Color::Red
            };
            let style = Style::default().fg(color);
            let wick_top = row_of(if bar.high.is_finite() { bar.high } else { bar.open.max(bar.close) });
            let wick_bottom = row_of(if bar.low.is_finite() { bar.low } else { bar.open.min(bar.close) });
            for y in wick_top..=wick_bottom {
                buf.set_string(x, y, "│", style);
            }
            let body_top = row_of(bar.open.max(bar.close));
            let body_bottom = row_of(bar.open.min(bar.close));
            for y in body_top..=body_bottom {
                buf.set_string(x, y, "█", style);
            }
        }

        for (col, color) in &overlays {
            for (i, v) in col.iter().enumerate() {
                let Some(v) = v.filter(|v| v.is_finite()) else {
                    continue;
                };
                buf.set_string(inner.x + i as u16, row_of(v), "•", Style::default().fg(*color));
            }
        }

        // Axis labels
        let label_y = inner.y + inner.height - 1;
        let label_style = Style::default().fg(Color::DarkGray);
        buf.set_string(inner.x, inner.y, format!("{:.2}", hi), label_style);
        buf.set_string(
            inner.x,
            label_y.saturating_sub(1),
            format!("{:.2}", lo),
            label_style,
        );
        if let (Some(first), Some(last)) = (visible.first(), visible.last()) {
            let right = last.datetime.format(AXIS_TIME_FORMAT).to_string();
            buf.set_string(
                inner.x,
                label_y,
                first.datetime.format(AXIS_TIME_FORMAT).to_string(),
                label_style,
            );
            let right_x = (inner.x + inner.width).saturating_sub(right.len() as u16);
            buf.set_string(right_x, label_y, right, label_style);
        }
    }
}

impl Widget for PriceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.chart_type {
            ChartType::Candlestick => self.render_candles(area, buf),
            ChartType::Line => self.render_line(area, buf),
        }
    }
}

/// RSI sub-chart on a fixed 0..100 scale with 30/70 guides.
pub struct RsiChart<'a> {
    data: &'a EnrichedSeries,
}

impl<'a> RsiChart<'a> {
    pub fn new(data: &'a EnrichedSeries) -> Self {
        Self { data }
    }
}

impl Widget for RsiChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rsi = points(&self.data.indicators.rsi_14);
        let max_x = (self.data.len().saturating_sub(1)).max(1) as f64;
        let upper = [(0.0, 70.0), (max_x, 70.0)];
        let lower = [(0.0, 30.0), (max_x, 30.0)];
        let guide = Style::default().fg(Color::DarkGray);
        let datasets = vec![
            Dataset::default()
                .graph_type(GraphType::Line)
                .marker(symbols::Marker::Dot)
                .style(guide)
                .data(&upper),
            Dataset::default()
                .graph_type(GraphType::Line)
                .marker(symbols::Marker::Dot)
                .style(guide)
                .data(&lower),
            Dataset::default()
                .name("RSI")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::LightBlue))
                .data(&rsi),
        ];
        Chart::new(datasets)
            .block(bordered(" RSI Indicator ".to_string()))
            .x_axis(Axis::default().bounds([0.0, max_x]))
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, 100.0])
                    .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
            )
            .render(area, buf);
    }
}

/// MACD line with its signal line.
pub struct MacdChart<'a> {
    data: &'a EnrichedSeries,
}

impl<'a> MacdChart<'a> {
    pub fn new(data: &'a EnrichedSeries) -> Self {
        Self { data }
    }
}

impl Widget for MacdChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = bordered(" MACD Indicator ".to_string());
        let macd = points(&self.data.indicators.macd);
        let signal = points(&self.data.indicators.macd_signal);
        let Some(bounds) = y_bounds(&[macd.as_slice(), signal.as_slice()]) else {
            block.render(area, buf);
            return;
        };
        let max_x = (self.data.len().saturating_sub(1)).max(1) as f64;
        let datasets = vec![
            Dataset::default()
                .name("MACD")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&macd),
            Dataset::default()
                .name("MACD_Signal")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&signal),
        ];
        Chart::new(datasets)
            .block(block)
            .x_axis(Axis::default().bounds([0.0, max_x]))
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds(bounds)
                    .labels(y_labels(bounds)),
            )
            .render(area, buf);
    }
}

/// Close prices of the primary and comparison tickers on a shared time axis.
pub struct ComparisonChart<'a> {
    primary: Option<&'a PrimaryView>,
    comparison: &'a ComparisonView,
}

impl<'a> ComparisonChart<'a> {
    pub fn new(primary: Option<&'a PrimaryView>, comparison: &'a ComparisonView) -> Self {
        Self {
            primary,
            comparison,
        }
    }
}

fn timed_closes(series: &PriceSeries) -> Vec<(f64, f64)> {
    series
        .bars
        .iter()
        .filter(|b| b.close.is_finite())
        .map(|b| (b.datetime.timestamp() as f64, b.close))
        .collect()
}

impl Widget for ComparisonChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let primary_name = self.primary.map(|p| p.name.as_str()).unwrap_or("---");
        let title = format!(
            " Comparison of {} and {} ",
            primary_name, self.comparison.name
        );
        let primary_pts = self
            .primary
            .map(|p| timed_closes(&p.data.series))
            .unwrap_or_default();
        let compare_pts = timed_closes(&self.comparison.series);

        let Some(bounds) = y_bounds(&[primary_pts.as_slice(), compare_pts.as_slice()]) else {
            bordered(title).render(area, buf);
            return;
        };
        let xs = primary_pts.iter().chain(compare_pts.iter()).map(|p| p.0);
        let x_lo = xs.clone().fold(f64::INFINITY, f64::min);
        let x_hi = xs.fold(f64::NEG_INFINITY, f64::max).max(x_lo + 1.0);

        let mut datasets = Vec::new();
        let primary_label = self
            .primary
            .map(|p| format!("{} Close Price", p.data.series.ticker))
            .unwrap_or_default();
        if !primary_pts.is_empty() {
            datasets.push(
                Dataset::default()
                    .name(primary_label)
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(Color::Cyan))
                    .data(&primary_pts),
            );
        }
        datasets.push(
            Dataset::default()
                .name(format!("{} Close Price", self.comparison.series.ticker))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::LightRed))
                .data(&compare_pts),
        );

        Chart::new(datasets)
            .block(bordered(title))
            .x_axis(
                Axis::default()
                    .title("Time")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([x_lo, x_hi])
                    .labels(time_labels(&self.comparison.series)),
            )
            .y_axis(
                Axis::default()
                    .title("Price (USD)")
                    .style(Style::default().fg(Color::Gray))
                    .bounds(bounds)
                    .labels(y_labels(bounds)),
            )
            .render(area, buf);
    }
}
