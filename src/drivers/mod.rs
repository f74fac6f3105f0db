//! Input side of the desktop.
//!
//! [`console::ConsoleDriver`] reads crossterm events from the terminal and
//! [`pointer::PointerRoute`] decides which of them reach the interaction
//! engine. The runner only sees the [`InputDriver`] seam, so tests swap in a
//! scripted event source.

pub mod console;
pub mod pointer;

use std::io;
use std::time::Duration;

use crossterm::event::Event;

/// Event source pumped by [`crate::event_loop::EventLoop`].
///
/// Mouse capture must be on for the desktop to receive presses, drags and
/// releases; the runner turns it on before the first poll and off on exit.
pub trait InputDriver {
    /// Whether an event is ready within `timeout`.
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    /// Next event. Only called after `poll` reported one.
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<D: InputDriver + ?Sized> InputDriver for &mut D {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}
