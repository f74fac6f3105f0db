//! Registry of in-progress drag and resize gestures.
//!
//! A session only holds the snapshot needed to turn a later pointer
//! position into geometry. The live geometry always comes from the window
//! store.

use std::collections::BTreeMap;

use crate::geometry::{Offset, Position, Size};
use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    /// Pointer position minus window position at the moment the drag began.
    pub pointer_offset: Offset,
}

impl DragSession {
    /// Unclamped window position for the given pointer position.
    pub fn target(&self, pointer: Position) -> Position {
        pointer - self.pointer_offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub start_pointer: Position,
    pub start_size: Size,
}

impl ResizeSession {
    /// Unclamped window size for the given pointer position.
    pub fn target(&self, pointer: Position) -> Size {
        self.start_size + (pointer - self.start_pointer)
    }
}

/// At most one drag and at most one resize per window, never both at once.
#[derive(Debug, Default, Clone)]
pub struct SessionRegistry {
    drags: BTreeMap<WindowId, DragSession>,
    resizes: BTreeMap<WindowId, ResizeSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a drag for `window_id`, replacing any stale session it had.
    pub fn begin_drag(&mut self, window_id: WindowId, pointer: Position, window_pos: Position) {
        self.resizes.remove(&window_id);
        self.drags.insert(
            window_id,
            DragSession {
                window_id,
                pointer_offset: pointer - window_pos,
            },
        );
    }

    /// Open a resize for `window_id`, replacing any stale session it had.
    pub fn begin_resize(&mut self, window_id: WindowId, pointer: Position, window_size: Size) {
        self.drags.remove(&window_id);
        self.resizes.insert(
            window_id,
            ResizeSession {
                window_id,
                start_pointer: pointer,
                start_size: window_size,
            },
        );
    }

    pub fn is_empty(&self) -> bool {
        self.drags.is_empty() && self.resizes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.drags.len() + self.resizes.len()
    }

    pub fn clear_all(&mut self) {
        self.drags.clear();
        self.resizes.clear();
    }

    /// Drop whatever session `window_id` has. Returns whether one existed.
    pub fn discard(&mut self, window_id: WindowId) -> bool {
        let drag = self.drags.remove(&window_id).is_some();
        let resize = self.resizes.remove(&window_id).is_some();
        drag || resize
    }

    /// Keep only sessions whose window `is_live` still reports. Returns the
    /// number of sessions dropped.
    pub fn retain_live<F>(&mut self, mut is_live: F) -> usize
    where
        F: FnMut(WindowId) -> bool,
    {
        let before = self.len();
        self.drags.retain(|id, _| is_live(*id));
        self.resizes.retain(|id, _| is_live(*id));
        before - self.len()
    }

    pub fn contains(&self, window_id: WindowId) -> bool {
        self.drags.contains_key(&window_id) || self.resizes.contains_key(&window_id)
    }

    pub fn drag(&self, window_id: WindowId) -> Option<&DragSession> {
        self.drags.get(&window_id)
    }

    pub fn resize(&self, window_id: WindowId) -> Option<&ResizeSession> {
        self.resizes.get(&window_id)
    }

    pub fn drags(&self) -> impl Iterator<Item = &DragSession> {
        self.drags.values()
    }

    pub fn resizes(&self) -> impl Iterator<Item = &ResizeSession> {
        self.resizes.values()
    }
}
