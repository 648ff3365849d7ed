//! Terminal ownership for the `grid-snake` host: the rendered board is drawn
//! on the alternate screen in raw mode so key presses reach the turn loop
//! unbuffered, and the user's shell is handed back intact on every exit path.

use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// ratatui terminal the host draws the board, status line and popups into.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Guard held by `main` for as long as games are being played.
///
/// Restarting after a win or loss reuses the same guard; the terminal is only
/// restored when the guard drops on quit or on an error bubbling out of the
/// turn loop.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Switches to raw mode and the alternate screen with the cursor hidden.
    /// Any step that fails undoes the earlier ones before returning.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Restores the terminal before the default panic message, so a panic in the
/// engine or renderer prints readable output instead of raw-mode garbage.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}

fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
