use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::desktop::Desktop;
use crate::drivers::InputDriver;
use crate::error::DesktopError;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::store::WindowSpec;

/// Route one input event to the desktop. Ctrl+Q quits, Ctrl+N opens a
/// fresh window, everything else goes to pointer handling.
pub fn dispatch(desktop: &mut Desktop, event: &Event) -> ControlFlow {
    if let Event::Key(key) = event
        && key.kind == KeyEventKind::Press
        && key.modifiers.contains(KeyModifiers::CONTROL)
    {
        match key.code {
            KeyCode::Char('q') => return ControlFlow::Quit,
            KeyCode::Char('n') => {
                let n = desktop.store().len() + 1;
                desktop.open(WindowSpec::new(format!("Window {n}"), "inspector"));
                return ControlFlow::Continue;
            }
            _ => {}
        }
    }
    desktop.handle_event(event);
    ControlFlow::Continue
}

pub fn run_desktop<B, D>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    desktop: &mut Desktop,
    poll_interval: Duration,
) -> Result<(), DesktopError>
where
    B: Backend,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    let result = event_loop.run(|_, event| match event {
        Some(event) => Ok(dispatch(desktop, &event)),
        None => {
            terminal
                .draw(|frame| desktop.render(frame))
                .map_err(|e| io::Error::other(e.to_string()))?;
            Ok(ControlFlow::Continue)
        }
    });

    event_loop.driver().set_mouse_capture(false)?;
    result.map_err(DesktopError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::config::DesktopConfig;
    use crate::desktop::panel::BottomBar;
    use crate::geometry::Position;
    use crate::store::WindowStore;

    #[derive(Default)]
    struct Scripted {
        events: VecDeque<Event>,
        capture: Vec<bool>,
    }

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.events
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }

        fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
            self.capture.push(enabled);
            Ok(())
        }
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn ctrl_n_opens_and_ctrl_q_quits() {
        let mut desktop = Desktop::new(&DesktopConfig::default(), Rect::new(0, 0, 160, 50));
        assert_eq!(dispatch(&mut desktop, &ctrl('n')), ControlFlow::Continue);
        assert_eq!(desktop.store().len(), 1);
        assert_eq!(dispatch(&mut desktop, &ctrl('q')), ControlFlow::Quit);
    }

    #[test]
    fn scripted_drag_runs_to_completion() {
        let mut desktop = Desktop::new(&DesktopConfig::default(), Rect::new(0, 0, 160, 50))
            .with_panel(BottomBar::with_host_label("host"));
        let id = desktop.open(WindowSpec::new("Notes", "about").with_size(400, 320));
        desktop
            .store_mut()
            .update_window_position(id, Position::new(80, 80));

        let mut driver = Scripted {
            events: [
                mouse(MouseEventKind::Down(MouseButton::Left), 12, 5),
                mouse(MouseEventKind::Drag(MouseButton::Left), 17, 7),
                mouse(MouseEventKind::Up(MouseButton::Left), 17, 7),
                ctrl('q'),
            ]
            .into_iter()
            .collect(),
            capture: Vec::new(),
        };
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        run_desktop(&mut terminal, &mut driver, &mut desktop, Duration::ZERO).unwrap();

        assert_eq!(
            desktop.store().window(id).unwrap().position,
            Position::new(120, 112)
        );
        assert!(!desktop.engine().is_listening());
        assert_eq!(driver.capture, vec![true, false]);
    }
}
