use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
  HideHelp,
  None,
  OpenSelected,
  PageDown,
  PageUp,
  Quit,
  Refresh,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
}

impl Action {
  pub(crate) fn from_key(key: KeyEvent) -> Self {
    let modifiers = key.modifiers;

    match key.code {
      KeyCode::Char('q' | 'Q') | KeyCode::Esc => Self::Quit,
      KeyCode::Char('?') => Self::ShowHelp,
      KeyCode::Char('r' | 'R') => Self::Refresh,
      KeyCode::Down | KeyCode::Char('j') => Self::SelectNext,
      KeyCode::Up | KeyCode::Char('k') => Self::SelectPrevious,
      KeyCode::PageDown => Self::PageDown,
      KeyCode::PageUp => Self::PageUp,
      KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
        Self::PageDown
      }
      KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
        Self::PageUp
      }
      KeyCode::Home | KeyCode::Char('g') => Self::SelectFirst,
      KeyCode::End | KeyCode::Char('G') => Self::SelectLast,
      KeyCode::Enter | KeyCode::Char('o' | 'O') => Self::OpenSelected,
      _ => Self::None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn control_chords_page() {
    assert_eq!(
      Action::from_key(KeyEvent::new(
        KeyCode::Char('d'),
        KeyModifiers::CONTROL
      )),
      Action::PageDown
    );

    assert_eq!(
      Action::from_key(KeyEvent::new(
        KeyCode::Char('u'),
        KeyModifiers::CONTROL
      )),
      Action::PageUp
    );

    assert_eq!(Action::from_key(key(KeyCode::Char('d'))), Action::None);
  }

  #[test]
  fn navigation_keys_map_to_selection() {
    assert_eq!(Action::from_key(key(KeyCode::Down)), Action::SelectNext);
    assert_eq!(
      Action::from_key(key(KeyCode::Char('j'))),
      Action::SelectNext
    );
    assert_eq!(Action::from_key(key(KeyCode::Up)), Action::SelectPrevious);
    assert_eq!(Action::from_key(key(KeyCode::Home)), Action::SelectFirst);
    assert_eq!(Action::from_key(key(KeyCode::End)), Action::SelectLast);
  }

  #[test]
  fn refresh_open_and_quit() {
    assert_eq!(Action::from_key(key(KeyCode::Char('r'))), Action::Refresh);
    assert_eq!(Action::from_key(key(KeyCode::Enter)), Action::OpenSelected);
    assert_eq!(Action::from_key(key(KeyCode::Esc)), Action::Quit);
    assert_eq!(Action::from_key(key(KeyCode::Char('?'))), Action::ShowHelp);
  }
}
