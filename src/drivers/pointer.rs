//! Pointer routing for the terminal desktop.
//!
//! The terminal reports every mouse event through a single stream, so the
//! "global" move/up listeners are modelled as a route: while attached,
//! drag/move/up events go to the interaction engine; while detached they are
//! dropped before reaching it.

use crossterm::event::{Event, MouseEventKind};

use crate::listeners::PointerSurface;

#[derive(Debug, Default, Clone)]
pub struct PointerRoute {
    listening: bool,
    attached_count: usize,
    detached_count: usize,
}

impl PointerRoute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Number of times listeners have been added.
    pub fn attached_count(&self) -> usize {
        self.attached_count
    }

    /// Number of times listeners have been removed.
    pub fn detached_count(&self) -> usize {
        self.detached_count
    }

    /// Whether `event` is a move or release the engine should see.
    pub fn accepts(&self, event: &Event) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        self.listening
            && matches!(
                mouse.kind,
                MouseEventKind::Drag(_) | MouseEventKind::Moved | MouseEventKind::Up(_)
            )
    }
}

impl PointerSurface for PointerRoute {
    fn add_pointer_listeners(&mut self) {
        self.listening = true;
        self.attached_count += 1;
    }

    fn remove_pointer_listeners(&mut self) {
        self.listening = false;
        self.detached_count += 1;
    }
}
