/// Input decode: at most one pending terminal event per frame, mapped
/// through a closed command set.
///
/// Keys use the vi cluster (hjkl plus yubn diagonals) or the arrows;
/// letters match either case. The pointer drives planning: a left
/// release walks the player toward the addressed pixel (Ctrl picks the
/// lower half of the character cell), a middle release quits.
/// Anything unrecognized, and any decode error, is simply no event.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use super::renderer::SubRow;

/// Everything a key press can mean.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Quit,
    Reset,
    Step(i32, i32),
}

/// One decoded frame input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputEvent {
    Key(Command),
    /// Left-button release: walk the player toward this terminal cell.
    PlanAt { col: u16, row: u16, sub: SubRow },
}

/// The key table. Lowercase letters only; `map_key` folds case.
const KEY_BINDINGS: &[(char, Command)] = &[
    ('q', Command::Quit),
    ('r', Command::Reset),
    ('h', Command::Step(-1, 0)),
    ('l', Command::Step(1, 0)),
    ('k', Command::Step(0, -1)),
    ('j', Command::Step(0, 1)),
    ('y', Command::Step(-1, -1)),
    ('u', Command::Step(1, -1)),
    ('b', Command::Step(-1, 1)),
    ('n', Command::Step(1, 1)),
];

/// Poll for at most one pending event, without blocking.
pub fn poll_event() -> Option<InputEvent> {
    if !event::poll(Duration::ZERO).unwrap_or(false) {
        return None;
    }
    match event::read() {
        Ok(Event::Key(key)) => map_key(key),
        Ok(Event::Mouse(mouse)) => map_mouse(mouse),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(InputEvent::Key(Command::Quit));
    }
    let command = match key.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Left => Some(Command::Step(-1, 0)),
        KeyCode::Right => Some(Command::Step(1, 0)),
        KeyCode::Up => Some(Command::Step(0, -1)),
        KeyCode::Down => Some(Command::Step(0, 1)),
        KeyCode::Char(c) => {
            let c = c.to_ascii_lowercase();
            KEY_BINDINGS
                .iter()
                .find(|&&(k, _)| k == c)
                .map(|&(_, cmd)| cmd)
        }
        _ => None,
    };
    command.map(InputEvent::Key)
}

fn map_mouse(mouse: MouseEvent) -> Option<InputEvent> {
    match mouse.kind {
        MouseEventKind::Up(MouseButton::Left) => {
            let sub = if mouse.modifiers.contains(KeyModifiers::CONTROL) {
                SubRow::Lower
            } else {
                SubRow::Upper
            };
            Some(InputEvent::PlanAt {
                col: mouse.column,
                row: mouse.row,
                sub,
            })
        }
        MouseEventKind::Up(MouseButton::Middle) => Some(InputEvent::Key(Command::Quit)),
        _ => None,
    }
}
