use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEventKind};

use crate::app::ViewMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ForceQuit,
    ConfirmQuit,
    CancelQuit,
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    Select,
    Back,
    ShowDetail,
    ShowPipeds,
    ShowHelp,
    ToggleFilter,
    FilterInput(char),
    FilterBackspace,
    FilterSubmit,
    CycleSort,
    Refresh,
    Sync,
    OpenStrategyMenu,
    OpenPipedMenu,
    DismissPipedKey,
    ToggleLog,
    ClearLog,
    None,
}

pub fn handle_event(event: &Event, mode: ViewMode) -> Action {
    match event {
        Event::Key(key) => handle_key(key, mode),
        Event::Mouse(mouse) => handle_mouse(mouse.kind, mode),
        _ => Action::None,
    }
}

fn handle_mouse(kind: MouseEventKind, mode: ViewMode) -> Action {
    match kind {
        MouseEventKind::ScrollUp => match mode {
            ViewMode::List | ViewMode::Filter | ViewMode::Pipeds | ViewMode::Log => Action::MoveUp,
            _ => Action::None,
        },
        MouseEventKind::ScrollDown => match mode {
            ViewMode::List | ViewMode::Filter | ViewMode::Pipeds | ViewMode::Log => {
                Action::MoveDown
            }
            _ => Action::None,
        },
        _ => Action::None,
    }
}

fn handle_key(key: &KeyEvent, mode: ViewMode) -> Action {
    // Ctrl+c exits immediately, skipping the in-flight-sync confirmation.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::ForceQuit;
    }

    match mode {
        ViewMode::Filter => handle_filter_key(key),
        ViewMode::Detail => handle_detail_key(key),
        ViewMode::StrategyMenu | ViewMode::PipedMenu => handle_menu_key(key),
        ViewMode::Pipeds => handle_pipeds_key(key),
        ViewMode::PipedKey => handle_piped_key_dialog(key),
        ViewMode::ConfirmQuit => handle_confirm_quit_key(key),
        ViewMode::Log => handle_log_key(key),
        ViewMode::List | ViewMode::Help => handle_normal_key(key),
    }
}

fn handle_normal_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('g') => Action::MoveToTop,
        KeyCode::Char('G') => Action::MoveToBottom,
        KeyCode::Enter | KeyCode::Char('d') => Action::ShowDetail,
        KeyCode::Esc => Action::Back,
        KeyCode::Char('p') => Action::ShowPipeds,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char('/') => Action::ToggleFilter,
        KeyCode::Char('o') => Action::CycleSort,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('s') => Action::Sync,
        KeyCode::Char('L') => Action::ToggleLog,
        _ => Action::None,
    }
}

fn handle_detail_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::Back,
        KeyCode::Char('s') | KeyCode::Enter => Action::Sync,
        KeyCode::Char('S') | KeyCode::Char('m') => Action::OpenStrategyMenu,
        KeyCode::Char('r') => Action::Refresh,
        _ => Action::None,
    }
}

fn handle_menu_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Enter => Action::Select,
        KeyCode::Esc | KeyCode::Char('q') => Action::Back,
        _ => Action::None,
    }
}

fn handle_pipeds_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Back,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('g') => Action::MoveToTop,
        KeyCode::Char('G') => Action::MoveToBottom,
        KeyCode::Enter | KeyCode::Char('m') => Action::OpenPipedMenu,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('L') => Action::ToggleLog,
        KeyCode::Char('?') => Action::ShowHelp,
        _ => Action::None,
    }
}

fn handle_piped_key_dialog(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Action::DismissPipedKey,
        _ => Action::None,
    }
}

fn handle_filter_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::Back,
        KeyCode::Enter => Action::FilterSubmit,
        KeyCode::Backspace => Action::FilterBackspace,
        KeyCode::Char(c) => Action::FilterInput(c),
        _ => Action::None,
    }
}

fn handle_confirm_quit_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') => Action::ConfirmQuit,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('n') => Action::CancelQuit,
        _ => Action::None,
    }
}

fn handle_log_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('L') => Action::ToggleLog,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('g') => Action::MoveToTop,
        KeyCode::Char('G') => Action::MoveToBottom,
        KeyCode::Char('c') => Action::ClearLog,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_ctrl_c_force_quits_in_any_mode() {
        let ctrl_c = Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        assert_eq!(handle_event(&ctrl_c, ViewMode::List), Action::ForceQuit);
        assert_eq!(handle_event(&ctrl_c, ViewMode::Filter), Action::ForceQuit);
        assert_eq!(
            handle_event(&ctrl_c, ViewMode::ConfirmQuit),
            Action::ForceQuit
        );
    }

    #[test]
    fn test_sync_keys_in_detail() {
        assert_eq!(
            handle_event(&key(KeyCode::Char('s')), ViewMode::Detail),
            Action::Sync
        );
        assert_eq!(
            handle_event(&key(KeyCode::Char('S')), ViewMode::Detail),
            Action::OpenStrategyMenu
        );
        assert_eq!(
            handle_event(&key(KeyCode::Esc), ViewMode::Detail),
            Action::Back
        );
    }

    #[test]
    fn test_filter_captures_chars() {
        assert_eq!(
            handle_event(&key(KeyCode::Char('q')), ViewMode::Filter),
            Action::FilterInput('q')
        );
        assert_eq!(
            handle_event(&key(KeyCode::Enter), ViewMode::Filter),
            Action::FilterSubmit
        );
    }

    #[test]
    fn test_list_navigation() {
        assert_eq!(
            handle_event(&key(KeyCode::Char('j')), ViewMode::List),
            Action::MoveDown
        );
        assert_eq!(
            handle_event(&key(KeyCode::Char('p')), ViewMode::List),
            Action::ShowPipeds
        );
        assert_eq!(
            handle_event(&key(KeyCode::Enter), ViewMode::List),
            Action::ShowDetail
        );
    }
}
