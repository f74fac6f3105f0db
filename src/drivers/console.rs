use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::InputDriver;

/// Reads input from the controlling terminal.
///
/// Key releases are dropped so platforms that report them do not double
/// every key press.
#[derive(Debug, Default)]
pub struct ConsoleDriver;

impl ConsoleDriver {
    pub fn new() -> Self {
        Self
    }

    fn keep(event: &Event) -> bool {
        !matches!(event, Event::Key(key) if key.kind == KeyEventKind::Release)
    }
}

impl InputDriver for ConsoleDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        loop {
            let event = crossterm::event::read()?;
            if Self::keep(&event) {
                return Ok(event);
            }
        }
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        }
    }
}

/// Alternate-screen terminal that restores the user's shell on drop.
pub struct ConsoleTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleTerminal {
    pub fn enter() -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        Ok(Self {
            terminal,
            entered: true,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        self.entered = false;
        Ok(())
    }
}

impl Drop for ConsoleTerminal {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
