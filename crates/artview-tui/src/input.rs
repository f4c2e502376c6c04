use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::TextInput => map_key_text_input(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        MouseEventKind::Down(MouseButton::Left) => Action::ClickAt(mouse.column, mouse.row),
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Action::PrevPage,
        KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => Action::NextPage,
        KeyCode::Char('g') | KeyCode::Home => Action::FirstPage,
        KeyCode::Char('G') | KeyCode::End => Action::LastPage,
        KeyCode::Char(' ') | KeyCode::Enter => Action::ToggleRow,
        KeyCode::Char('a') => Action::ToggleAllOnPage,
        KeyCode::Char('s') => Action::OpenBulkPanel,
        KeyCode::Char('o') => Action::CycleSort,
        KeyCode::Char('O') => Action::ReverseSortDirection,
        KeyCode::Char('c') => Action::ClearSelection,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Esc => Action::NavigateBack,
        _ => Action::None,
    }
}

fn map_key_text_input(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::InputCancel,
        KeyCode::Enter => Action::InputConfirm,
        KeyCode::Tab | KeyCode::BackTab => Action::ToggleBulkMode,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn q_quits_only_in_normal_mode() {
        assert_eq!(map_event(&press(KeyCode::Char('q')), &InputMode::Normal), Action::Quit);
        assert_eq!(
            map_event(&press(KeyCode::Char('q')), &InputMode::TextInput),
            Action::InputChar('q')
        );
    }

    #[test]
    fn ctrl_c_quits_in_text_input() {
        let evt = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&evt, &InputMode::TextInput), Action::Quit);
    }

    #[test]
    fn arrows_page_in_normal_mode() {
        assert_eq!(map_event(&press(KeyCode::Right), &InputMode::Normal), Action::NextPage);
        assert_eq!(map_event(&press(KeyCode::Left), &InputMode::Normal), Action::PrevPage);
    }

    #[test]
    fn o_cycles_and_shift_o_reverses_sort() {
        assert_eq!(map_event(&press(KeyCode::Char('o')), &InputMode::Normal), Action::CycleSort);
        let shifted = Event::Key(KeyEvent::new(KeyCode::Char('O'), KeyModifiers::SHIFT));
        assert_eq!(map_event(&shifted, &InputMode::Normal), Action::ReverseSortDirection);
    }
}
