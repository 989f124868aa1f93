use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::selection::Indicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    NextTicker,
    PrevTicker,
    NextCompareTicker,
    PrevCompareTicker,
    CyclePeriod,
    CycleInterval,
    ToggleChartType,
    ToggleIndicator(Indicator),
    SwitchTableTab,
    ExportCsv,
    RefreshNow,
    Quit,
}

pub fn parse_main_command(key_code: &KeyCode) -> Option<UiCommand> {
    match key_code {
        KeyCode::Tab => Some(UiCommand::SwitchTableTab),
        KeyCode::Esc => Some(UiCommand::Quit),
        KeyCode::Char('T') => Some(UiCommand::PrevTicker),
        KeyCode::Char('C') => Some(UiCommand::PrevCompareTicker),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            't' => Some(UiCommand::NextTicker),
            'c' => Some(UiCommand::NextCompareTicker),
            'p' => Some(UiCommand::CyclePeriod),
            'i' => Some(UiCommand::CycleInterval),
            'k' => Some(UiCommand::ToggleChartType),
            '1' => Some(UiCommand::ToggleIndicator(Indicator::Sma20)),
            '2' => Some(UiCommand::ToggleIndicator(Indicator::Ema20)),
            '3' => Some(UiCommand::ToggleIndicator(Indicator::Rsi)),
            '4' => Some(UiCommand::ToggleIndicator(Indicator::Macd)),
            'e' => Some(UiCommand::ExportCsv),
            'r' => Some(UiCommand::RefreshNow),
            'q' => Some(UiCommand::Quit),
            _ => None,
        },
        _ => None,
    }
}

/// Raw mode delivers Ctrl+C as a key press instead of SIGINT, so it is
/// mapped to quit here before the plain key bindings apply.
pub fn parse_key_event(key: &KeyEvent) -> Option<UiCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(UiCommand::Quit),
            _ => None,
        };
    }
    parse_main_command(&key.code)
}
