//! Global pointer listener lifetime.
//!
//! The move/up listener pair is live exactly while at least one gesture
//! session is open. Both guards are idempotent and are called after every
//! registry mutation, so listener presence is a function of registry
//! emptiness alone.

use crate::session::SessionRegistry;

/// The global input surface pointer-move and pointer-up listeners hang off.
pub trait PointerSurface {
    fn add_pointer_listeners(&mut self);
    fn remove_pointer_listeners(&mut self);
}

impl<T: PointerSurface + ?Sized> PointerSurface for &mut T {
    fn add_pointer_listeners(&mut self) {
        (**self).add_pointer_listeners()
    }

    fn remove_pointer_listeners(&mut self) {
        (**self).remove_pointer_listeners()
    }
}

#[derive(Debug)]
pub struct ListenerLifecycle<S> {
    surface: S,
    attached: bool,
}

impl<S: PointerSurface> ListenerLifecycle<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            attached: false,
        }
    }

    pub fn ensure_attached(&mut self, registry: &SessionRegistry) {
        if !self.attached && !registry.is_empty() {
            self.surface.add_pointer_listeners();
            self.attached = true;
            tracing::debug!(sessions = registry.len(), "pointer listeners attached");
        }
    }

    pub fn ensure_detached(&mut self, registry: &SessionRegistry) {
        if self.attached && registry.is_empty() {
            self.surface.remove_pointer_listeners();
            self.attached = false;
            tracing::debug!("pointer listeners detached");
        }
    }

    pub fn sync(&mut self, registry: &SessionRegistry) {
        self.ensure_attached(registry);
        self.ensure_detached(registry);
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;
    use crate::window::WindowId;

    #[derive(Debug, Default)]
    struct Counting {
        adds: usize,
        removes: usize,
    }

    impl PointerSurface for Counting {
        fn add_pointer_listeners(&mut self) {
            self.adds += 1;
        }

        fn remove_pointer_listeners(&mut self) {
            self.removes += 1;
        }
    }

    #[test]
    fn empty_registry_never_attaches() {
        let registry = SessionRegistry::new();
        let mut lifecycle = ListenerLifecycle::new(Counting::default());
        lifecycle.sync(&registry);
        lifecycle.ensure_detached(&registry);
        assert!(!lifecycle.is_attached());
        assert_eq!(lifecycle.surface().adds, 0);
        assert_eq!(lifecycle.surface().removes, 0);
    }

    #[test]
    fn attach_and_detach_are_idempotent() {
        let mut registry = SessionRegistry::new();
        let mut lifecycle = ListenerLifecycle::new(Counting::default());
        registry.begin_drag(WindowId(1), Position::new(5, 5), Position::new(0, 0));
        lifecycle.sync(&registry);
        lifecycle.sync(&registry);
        lifecycle.ensure_attached(&registry);
        assert!(lifecycle.is_attached());
        assert_eq!(lifecycle.surface().adds, 1);

        // Non-empty registry keeps listeners in place.
        lifecycle.ensure_detached(&registry);
        assert!(lifecycle.is_attached());

        registry.clear_all();
        lifecycle.sync(&registry);
        lifecycle.sync(&registry);
        assert!(!lifecycle.is_attached());
        assert_eq!(lifecycle.surface().removes, 1);
    }

    #[test]
    fn works_through_mutable_reference() {
        let mut surface = Counting::default();
        let mut registry = SessionRegistry::new();
        {
            let mut lifecycle = ListenerLifecycle::new(&mut surface);
            registry.begin_drag(WindowId(2), Position::new(5, 5), Position::new(0, 0));
            lifecycle.sync(&registry);
            registry.clear_all();
            lifecycle.sync(&registry);
        }
        assert_eq!((surface.adds, surface.removes), (1, 1));
    }
}
