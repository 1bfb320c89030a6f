/// Keyboard bindings for the terminal front end
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use cubeview_core::{Command, RotationDirection};

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Scene(Command),
    Quit,
}

/// Default layout, matching the desktop build of the viewer
pub const BINDINGS: [(KeyCode, Command); 12] = [
    (KeyCode::Left, Command::OrbitLeft),
    (KeyCode::Right, Command::OrbitRight),
    (KeyCode::Down, Command::OrbitDown),
    (KeyCode::Up, Command::OrbitUp),
    (KeyCode::Char('w'), Command::ZoomOut),
    (KeyCode::Char('s'), Command::ZoomIn),
    (KeyCode::Char('a'), Command::PanForward),
    (KeyCode::Char('q'), Command::PanBackward),
    (KeyCode::Char('d'), Command::PanRight),
    (KeyCode::Char('r'), Command::PanLeft),
    (KeyCode::Char(' '), Command::Rotate(RotationDirection::Forward)),
    (KeyCode::Backspace, Command::Rotate(RotationDirection::Backward)),
];

pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Action::Quit)
        }
        _ => {}
    }

    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    BINDINGS
        .iter()
        .find(|(bound, _)| *bound == code)
        .map(|&(_, command)| Action::Scene(command))
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        other => format!("{other:?}"),
    }
}

/// One-line summary of the bindings for the status bar
pub fn help_line() -> String {
    let mut parts: Vec<String> = BINDINGS
        .iter()
        .map(|&(code, command)| format!("{}={}", key_name(code), command.label()))
        .collect();
    parts.push("Esc=quit".to_string());
    parts.join(" ")
}
