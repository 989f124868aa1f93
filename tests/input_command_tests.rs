use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ticker_dashboard::input::{parse_key_event, parse_main_command, UiCommand};
use ticker_dashboard::model::selection::Indicator;

#[test]
fn parse_main_command_maps_selector_keys() {
    assert_eq!(parse_main_command(&KeyCode::Char('t')), Some(UiCommand::NextTicker));
    assert_eq!(parse_main_command(&KeyCode::Char('T')), Some(UiCommand::PrevTicker));
    assert_eq!(
        parse_main_command(&KeyCode::Char('c')),
        Some(UiCommand::NextCompareTicker)
    );
    assert_eq!(
        parse_main_command(&KeyCode::Char('C')),
        Some(UiCommand::PrevCompareTicker)
    );
    assert_eq!(parse_main_command(&KeyCode::Char('p')), Some(UiCommand::CyclePeriod));
    assert_eq!(parse_main_command(&KeyCode::Char('P')), Some(UiCommand::CyclePeriod));
    assert_eq!(parse_main_command(&KeyCode::Char('i')), Some(UiCommand::CycleInterval));
    assert_eq!(
        parse_main_command(&KeyCode::Char('K')),
        Some(UiCommand::ToggleChartType)
    );
}

#[test]
fn parse_main_command_maps_indicator_keys() {
    let expected = [
        ('1', Indicator::Sma20),
        ('2', Indicator::Ema20),
        ('3', Indicator::Rsi),
        ('4', Indicator::Macd),
    ];
    for (key, indicator) in expected {
        assert_eq!(
            parse_main_command(&KeyCode::Char(key)),
            Some(UiCommand::ToggleIndicator(indicator))
        );
    }
    assert_eq!(parse_main_command(&KeyCode::Char('5')), None);
}

#[test]
fn parse_main_command_maps_actions() {
    assert_eq!(parse_main_command(&KeyCode::Tab), Some(UiCommand::SwitchTableTab));
    assert_eq!(parse_main_command(&KeyCode::Char('e')), Some(UiCommand::ExportCsv));
    assert_eq!(parse_main_command(&KeyCode::Char('R')), Some(UiCommand::RefreshNow));
    assert_eq!(parse_main_command(&KeyCode::Char('q')), Some(UiCommand::Quit));
    assert_eq!(parse_main_command(&KeyCode::Esc), Some(UiCommand::Quit));
    assert_eq!(parse_main_command(&KeyCode::Enter), None);
    assert_eq!(parse_main_command(&KeyCode::Char('x')), None);
}

#[test]
fn ctrl_c_quits_instead_of_switching_compare_ticker() {
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(parse_key_event(&ctrl_c), Some(UiCommand::Quit));

    let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
    assert_eq!(parse_key_event(&plain_c), Some(UiCommand::NextCompareTicker));

    let shift_c = KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT);
    assert_eq!(parse_key_event(&shift_c), Some(UiCommand::PrevCompareTicker));

    let ctrl_t = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL);
    assert_eq!(parse_key_event(&ctrl_t), None);
}
