//! Interaction engine: turns pointer gestures into committed window
//! geometry.
//!
//! The engine owns the session registry and the listener lifecycle, and is
//! handed the window store on every call. It keeps no geometry of its own
//! beyond the per-session snapshots, so focus or close actions taken between
//! events show up on the next commit. None of its operations fail: unknown
//! windows and stale sessions are absorbed silently.

use crate::geometry::{self, Geometry, GeometryPolicy, Position, Viewport, clamp_position};
use crate::listeners::{ListenerLifecycle, PointerSurface};
use crate::session::SessionRegistry;
use crate::store::WindowStore;
use crate::window::{WindowId, WindowRecord};

#[derive(Debug)]
pub struct InteractionEngine<S> {
    registry: SessionRegistry,
    listeners: ListenerLifecycle<S>,
    policy: GeometryPolicy,
    viewport: Viewport,
}

impl<S: PointerSurface> InteractionEngine<S> {
    pub fn new(surface: S, viewport: Viewport) -> Self {
        Self::with_registry(SessionRegistry::new(), surface, viewport)
    }

    /// Build around an existing registry.
    pub fn with_registry(registry: SessionRegistry, surface: S, viewport: Viewport) -> Self {
        let mut listeners = ListenerLifecycle::new(surface);
        listeners.sync(&registry);
        Self {
            registry,
            listeners,
            policy: GeometryPolicy::default(),
            viewport,
        }
    }

    pub fn with_policy(mut self, policy: GeometryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn policy(&self) -> GeometryPolicy {
        self.policy
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_listening(&self) -> bool {
        self.listeners.is_attached()
    }

    pub fn surface(&self) -> &S {
        self.listeners.surface()
    }

    /// Begin moving `id` by its header. Maximized windows do not move.
    pub fn start_drag<W>(&mut self, store: &mut W, id: WindowId, pointer: Position)
    where
        W: WindowStore + ?Sized,
    {
        let Some(window_pos) = store
            .window(id)
            .filter(|w| !w.is_maximized)
            .map(|w| w.position)
        else {
            tracing::trace!(window_id = %id, "drag ignored");
            return;
        };
        store.focus_window(id);
        self.registry.begin_drag(id, pointer, window_pos);
        tracing::debug!(window_id = %id, x = pointer.x, y = pointer.y, "drag started");
        self.listeners.sync(&self.registry);
    }

    /// Begin resizing `id` from its corner handle. Maximized windows do not
    /// resize.
    pub fn start_resize<W>(&mut self, store: &mut W, id: WindowId, pointer: Position)
    where
        W: WindowStore + ?Sized,
    {
        let Some(window_size) = store
            .window(id)
            .filter(|w| !w.is_maximized)
            .map(|w| w.size)
        else {
            tracing::trace!(window_id = %id, "resize ignored");
            return;
        };
        store.focus_window(id);
        self.registry.begin_resize(id, pointer, window_size);
        tracing::debug!(window_id = %id, x = pointer.x, y = pointer.y, "resize started");
        self.listeners.sync(&self.registry);
    }

    /// Recompute and commit geometry for every open session.
    pub fn on_pointer_move<W>(&mut self, store: &mut W, pointer: Position)
    where
        W: WindowStore + ?Sized,
    {
        let dropped = self.registry.retain_live(|id| store.window(id).is_some());
        if dropped > 0 {
            tracing::debug!(dropped, "discarded sessions of closed windows");
            self.listeners.sync(&self.registry);
        }

        for drag in self.registry.drags() {
            let Some(size) = store
                .window(drag.window_id)
                .filter(|w| !w.is_maximized)
                .map(|w| w.size)
            else {
                continue;
            };
            let position = clamp_position(drag.target(pointer), size, self.viewport);
            tracing::trace!(window_id = %drag.window_id, x = position.x, y = position.y, "move");
            store.update_window_position(drag.window_id, position);
        }

        for resize in self.registry.resizes() {
            if store.window(resize.window_id).is_none_or(|w| w.is_maximized) {
                continue;
            }
            let size = self.policy.clamp_size(resize.target(pointer));
            tracing::trace!(
                window_id = %resize.window_id,
                width = size.width,
                height = size.height,
                "resize"
            );
            store.update_window_size(resize.window_id, size);
        }
    }

    /// Release ends every gesture, whichever window started it.
    pub fn on_pointer_up(&mut self) {
        if !self.registry.is_empty() {
            tracing::debug!(sessions = self.registry.len(), "gestures ended");
        }
        self.registry.clear_all();
        self.listeners.sync(&self.registry);
    }

    /// Maximize a free-form window or restore a maximized one.
    pub fn toggle_maximize<W>(&mut self, store: &mut W, id: WindowId)
    where
        W: WindowStore + ?Sized,
    {
        let Some(toggled) = store.window(id).map(geometry::toggle_maximize) else {
            return;
        };
        if self.registry.discard(id) {
            self.listeners.sync(&self.registry);
        }
        tracing::debug!(window_id = %id, maximized = toggled.is_maximized, "toggled maximize");
        store.maximize_window(id, &toggled);
    }

    /// Adopt a new viewport and pull every window back inside it. Maximized
    /// windows keep their frame; the geometry they restore to is clamped
    /// instead.
    pub fn set_viewport<W>(&mut self, store: &mut W, viewport: Viewport)
    where
        W: WindowStore + ?Sized,
    {
        if self.viewport == viewport {
            return;
        }
        tracing::debug!(width = viewport.width, height = viewport.height, "viewport changed");
        self.viewport = viewport;

        let mut moves: Vec<(WindowId, Position)> = Vec::new();
        let mut restores: Vec<WindowRecord> = Vec::new();
        for window in store.windows() {
            if !window.is_maximized {
                let clamped = clamp_position(window.position, window.size, viewport);
                if clamped != window.position {
                    moves.push((window.id, clamped));
                }
                continue;
            }
            let Some(saved) = window.pre_maximize_geometry else {
                continue;
            };
            let clamped = clamp_position(saved.position, saved.size, viewport);
            if clamped != saved.position {
                let mut record = window.clone();
                record.pre_maximize_geometry = Some(Geometry {
                    position: clamped,
                    ..saved
                });
                restores.push(record);
            }
        }
        for (id, position) in moves {
            store.update_window_position(id, position);
        }
        for record in restores {
            store.maximize_window(record.id, &record);
        }
    }
}
