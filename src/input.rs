use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Direction requested for the next turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Heading every new engine starts with.
    pub const DEFAULT: Self = Self::Left;

    /// Returns the opposite heading.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step on `(x, y)`; `y` grows downwards.
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Resolves a requested heading against the last accepted one.
    ///
    /// A 180° reversal is read as "keep going straight": the request is
    /// replaced by `last` instead of being rejected or ending the game.
    #[must_use]
    pub fn effective(requested: Self, last: Self) -> Self {
        if requested == last.opposite() {
            last
        } else {
            requested
        }
    }
}

/// High-level input events consumed by the host loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Heading(Heading),
    Pause,
    Quit,
    Confirm,
}

/// Maps a terminal key event to a game input.
#[must_use]
pub fn map_key_event(event: KeyEvent) -> Option<GameInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match event.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k' | 'K') => GameInput::Heading(Heading::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => GameInput::Heading(Heading::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => GameInput::Heading(Heading::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => {
            GameInput::Heading(Heading::Right)
        }
        KeyCode::Char('p' | 'P') => GameInput::Pause,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Confirm,
        _ => return None,
    };

    Some(input)
}
