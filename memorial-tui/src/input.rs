//! Key bindings.
//!
//! Keys are translated into intents here so screens and the login form can
//! be driven without a terminal.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

/// Console-wide commands, available whenever no text field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    NextScreen,
    PreviousScreen,
    Logout,
}

/// Commands on a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    FocusLeft,
    FocusRight,
    CursorUp,
    CursorDown,
    ToggleSort,
    CycleFacet,
    ClearFilters,
    StartSearch,
    NextPage,
    PreviousPage,
    /// Jump to the n-th visible page button, 1-based.
    JumpToButton(usize),
    PageSizeUp,
    PageSizeDown,
    Delete,
    Reload,
}

/// Edits to a single-line text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    /// Move to the next field.
    Next,
    Submit,
    Cancel,
}

/// Answer to a yes/no prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Yes,
    No,
}

/// Ignores key releases and repeats reported by some terminals.
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

/// Returns `true` for `Ctrl-C`, which quits from anywhere.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

pub fn global_action(key: &KeyEvent) -> Option<GlobalAction> {
    match key.code {
        KeyCode::Char('q') => Some(GlobalAction::Quit),
        KeyCode::Tab => Some(GlobalAction::NextScreen),
        KeyCode::BackTab => Some(GlobalAction::PreviousScreen),
        KeyCode::Char('L') => Some(GlobalAction::Logout),
        _ => None,
    }
}

pub fn browse_action(key: &KeyEvent) -> Option<BrowseAction> {
    let action = match key.code {
        KeyCode::Left | KeyCode::Char('h') => BrowseAction::FocusLeft,
        KeyCode::Right | KeyCode::Char('l') => BrowseAction::FocusRight,
        KeyCode::Up | KeyCode::Char('k') => BrowseAction::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => BrowseAction::CursorDown,
        KeyCode::Char('s') => BrowseAction::ToggleSort,
        KeyCode::Char('f') => BrowseAction::CycleFacet,
        KeyCode::Char('c') => BrowseAction::ClearFilters,
        KeyCode::Char('/') => BrowseAction::StartSearch,
        KeyCode::Char('n') | KeyCode::PageDown => BrowseAction::NextPage,
        KeyCode::Char('p') | KeyCode::PageUp => BrowseAction::PreviousPage,
        KeyCode::Char(c @ '1'..='9') => BrowseAction::JumpToButton(c as usize - '0' as usize),
        KeyCode::Char('+') | KeyCode::Char('=') => BrowseAction::PageSizeUp,
        KeyCode::Char('-') => BrowseAction::PageSizeDown,
        KeyCode::Char('x') | KeyCode::Delete => BrowseAction::Delete,
        KeyCode::Char('r') => BrowseAction::Reload,
        _ => return None,
    };
    Some(action)
}

pub fn text_edit(key: &KeyEvent) -> Option<TextEdit> {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Some(TextEdit::Insert(c)),
        KeyCode::Backspace => Some(TextEdit::Backspace),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => Some(TextEdit::Next),
        KeyCode::Enter => Some(TextEdit::Submit),
        KeyCode::Esc => Some(TextEdit::Cancel),
        _ => None,
    }
}

pub fn confirm(key: &KeyEvent) -> Option<Confirm> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Confirm::Yes),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Confirm::No),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_keys() {
        assert_eq!(browse_action(&key(KeyCode::Char('s'))), Some(BrowseAction::ToggleSort));
        assert_eq!(browse_action(&key(KeyCode::Char('3'))), Some(BrowseAction::JumpToButton(3)));
        assert_eq!(browse_action(&key(KeyCode::Char('0'))), None);
        assert_eq!(browse_action(&key(KeyCode::Right)), Some(BrowseAction::FocusRight));
        assert_eq!(browse_action(&key(KeyCode::Char('+'))), Some(BrowseAction::PageSizeUp));
    }

    #[test]
    fn test_global_keys() {
        assert_eq!(global_action(&key(KeyCode::Char('q'))), Some(GlobalAction::Quit));
        assert_eq!(global_action(&key(KeyCode::BackTab)), Some(GlobalAction::PreviousScreen));
        assert_eq!(global_action(&key(KeyCode::Char('s'))), None);
    }

    #[test]
    fn test_interrupt() {
        assert!(is_interrupt(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_interrupt(&key(KeyCode::Char('c'))));
    }

    #[test]
    fn test_text_edit_and_confirm() {
        assert_eq!(text_edit(&key(KeyCode::Char('q'))), Some(TextEdit::Insert('q')));
        assert_eq!(text_edit(&key(KeyCode::Enter)), Some(TextEdit::Submit));
        assert_eq!(confirm(&key(KeyCode::Char('y'))), Some(Confirm::Yes));
        assert_eq!(confirm(&key(KeyCode::Esc)), Some(Confirm::No));
        assert_eq!(confirm(&key(KeyCode::Char('x'))), None);
    }
}
