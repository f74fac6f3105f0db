//! Window store: the single source of truth for window geometry and
//! stacking order.
//!
//! The interaction engine only talks to a store through [`WindowStore`].
//! [`MemoryStore`] is the in-process implementation the desktop, the tests
//! and the gesture bench run against.

use crate::constants::{CASCADE_STEP, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::geometry::{GeometryPolicy, Position, Size, Viewport, clamp_position};
use crate::window::{WindowId, WindowRecord};

/// Mutation surface the interaction engine and render loop use.
///
/// Every call that names an unknown window is a no-op.
pub trait WindowStore {
    fn windows(&self) -> &[WindowRecord];

    fn window(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows().iter().find(|w| w.id == id)
    }

    fn active_window_id(&self) -> Option<WindowId>;

    /// Raise `id` to the top of the stacking order and make it active.
    fn focus_window(&mut self, id: WindowId);

    fn close_window(&mut self, id: WindowId);

    fn minimize_window(&mut self, id: WindowId);

    /// Bring a minimized window back into the layout and focus it.
    fn restore_window(&mut self, id: WindowId);

    /// Commit the maximize state of `toggled` (flag, free-form geometry and
    /// saved snapshot) onto the stored record.
    fn maximize_window(&mut self, id: WindowId, toggled: &WindowRecord);

    fn update_window_position(&mut self, id: WindowId, position: Position);

    fn update_window_size(&mut self, id: WindowId, size: Size);
}

/// What to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub icon: Option<char>,
    pub component: String,
    pub size: Option<Size>,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            component: component.into(),
            size: None,
        }
    }

    pub fn with_icon(mut self, icon: char) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }
}

#[derive(Debug, Clone)]
pub struct MemoryStore {
    windows: Vec<WindowRecord>,
    active: Option<WindowId>,
    next_id: u64,
    next_z: u32,
    cascade: i32,
    viewport: Viewport,
    policy: GeometryPolicy,
}

impl MemoryStore {
    pub fn new(viewport: Viewport, policy: GeometryPolicy) -> Self {
        Self {
            windows: Vec::new(),
            active: None,
            next_id: 1,
            next_z: 1,
            cascade: 0,
            viewport,
            policy,
        }
    }

    /// Viewport used to place newly opened windows.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Open a window on top of the stack at the next cascade slot.
    pub fn open_window(&mut self, spec: WindowSpec) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;

        let size = self.policy.clamp_size(
            spec.size
                .unwrap_or(Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)),
        );
        let position = self.next_cascade_position(size);

        let mut record = WindowRecord::new(id, spec.title, spec.component);
        record.icon = spec.icon;
        record.size = size;
        record.position = position;
        record.z_index = self.take_z();
        tracing::debug!(window_id = %id, title = %record.title, "opened window");
        self.windows.push(record);
        self.active = Some(id);
        id
    }

    fn next_cascade_position(&mut self, size: Size) -> Position {
        let area = self.viewport.work_area(self.policy.reserved_bottom);
        let step = CASCADE_STEP.saturating_mul(self.cascade + 1);
        let fits = step.saturating_add(size.width) <= area.width
            && step.saturating_add(size.height) <= area.height;
        let offset = if fits {
            self.cascade += 1;
            step
        } else {
            self.cascade = 1;
            CASCADE_STEP
        };
        let bounds = Viewport::new(area.width, area.height);
        clamp_position(Position::new(offset, offset), size, bounds)
    }

    fn take_z(&mut self) -> u32 {
        let z = self.next_z;
        self.next_z = self.next_z.saturating_add(1);
        z
    }

    fn record_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    fn top_visible_except(&self, id: WindowId) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| w.id != id && w.is_visible())
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)
    }

    /// Non-minimized windows, back to front.
    pub fn visible_windows(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| w.is_visible()).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl WindowStore for MemoryStore {
    fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    fn active_window_id(&self) -> Option<WindowId> {
        self.active
    }

    fn focus_window(&mut self, id: WindowId) {
        let top = self.windows.iter().map(|w| w.z_index).max().unwrap_or(0);
        let Some(current) = self.window(id).map(|w| w.z_index) else {
            return;
        };
        if self.active == Some(id) && current == top {
            return;
        }
        let z = self.take_z();
        if let Some(record) = self.record_mut(id) {
            record.z_index = z;
        }
        self.active = Some(id);
        tracing::trace!(window_id = %id, z_index = z, "focused window");
    }

    fn close_window(&mut self, id: WindowId) {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != id);
        if self.windows.len() == before {
            return;
        }
        tracing::debug!(window_id = %id, "closed window");
        if self.active == Some(id) {
            self.active = self.top_visible_except(id);
        }
    }

    fn minimize_window(&mut self, id: WindowId) {
        let Some(record) = self.record_mut(id) else {
            return;
        };
        if record.is_minimized {
            return;
        }
        record.is_minimized = true;
        tracing::debug!(window_id = %id, "minimized window");
        if self.active == Some(id) {
            self.active = self.top_visible_except(id);
        }
    }

    fn restore_window(&mut self, id: WindowId) {
        let Some(record) = self.record_mut(id) else {
            return;
        };
        record.is_minimized = false;
        self.focus_window(id);
    }

    fn maximize_window(&mut self, id: WindowId, toggled: &WindowRecord) {
        let Some(record) = self.record_mut(id) else {
            return;
        };
        record.position = toggled.position;
        record.size = toggled.size;
        record.pre_maximize_geometry = toggled.pre_maximize_geometry;
        record.is_maximized = toggled.is_maximized;
    }

    fn update_window_position(&mut self, id: WindowId, position: Position) {
        if let Some(record) = self.record_mut(id) {
            record.position = position;
        }
    }

    fn update_window_size(&mut self, id: WindowId, size: Size) {
        if let Some(record) = self.record_mut(id) {
            record.size = size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::toggle_maximize;

    fn store() -> MemoryStore {
        MemoryStore::new(Viewport::new(1280, 800), GeometryPolicy::default())
    }

    #[test]
    fn open_window_focuses_and_stacks_on_top() {
        let mut store = store();
        let a = store.open_window(WindowSpec::new("A", "about"));
        let b = store.open_window(WindowSpec::new("B", "about"));
        assert_eq!(store.active_window_id(), Some(b));
        let za = store.window(a).unwrap().z_index;
        let zb = store.window(b).unwrap().z_index;
        assert!(zb > za);
    }

    #[test]
    fn open_window_cascades_and_floors_size() {
        let mut store = store();
        let a = store.open_window(WindowSpec::new("A", "about"));
        let b = store.open_window(WindowSpec::new("B", "about").with_size(10, 10));
        assert_eq!(store.window(a).unwrap().position, Position::new(32, 32));
        assert_eq!(store.window(b).unwrap().position, Position::new(64, 64));
        assert_eq!(store.window(b).unwrap().size, Size::new(320, 240));
    }

    #[test]
    fn cascade_wraps_inside_work_area() {
        let mut store = MemoryStore::new(Viewport::new(800, 600), GeometryPolicy::default());
        let mut last = Position::default();
        for _ in 0..20 {
            let id = store.open_window(WindowSpec::new("W", "about"));
            let record = store.window(id).unwrap();
            assert!(record.position.x + record.size.width <= 800);
            assert!(record.position.y + record.size.height <= 600 - 64);
            last = record.position;
        }
        assert!(last.x >= CASCADE_STEP);
    }

    #[test]
    fn focus_reassigns_z_monotonically() {
        let mut store = store();
        let a = store.open_window(WindowSpec::new("A", "about"));
        let b = store.open_window(WindowSpec::new("B", "about"));
        let zb = store.window(b).unwrap().z_index;
        store.focus_window(a);
        assert!(store.window(a).unwrap().z_index > zb);
        assert_eq!(store.active_window_id(), Some(a));
        let za = store.window(a).unwrap().z_index;
        store.focus_window(a);
        assert_eq!(store.window(a).unwrap().z_index, za);
    }

    #[test]
    fn closing_active_hands_focus_to_topmost_visible() {
        let mut store = store();
        let a = store.open_window(WindowSpec::new("A", "about"));
        let b = store.open_window(WindowSpec::new("B", "about"));
        let c = store.open_window(WindowSpec::new("C", "about"));
        store.minimize_window(b);
        store.close_window(c);
        assert_eq!(store.active_window_id(), Some(a));
        assert!(store.window(c).is_none());
    }

    #[test]
    fn minimize_and_restore() {
        let mut store = store();
        let a = store.open_window(WindowSpec::new("A", "about"));
        let b = store.open_window(WindowSpec::new("B", "about"));
        store.minimize_window(b);
        assert!(store.window(b).unwrap().is_minimized);
        assert_eq!(store.active_window_id(), Some(a));
        assert_eq!(store.visible_windows().len(), 1);
        store.restore_window(b);
        assert!(!store.window(b).unwrap().is_minimized);
        assert_eq!(store.active_window_id(), Some(b));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = store();
        let a = store.open_window(WindowSpec::new("A", "about"));
        let ghost = WindowId(99);
        store.focus_window(ghost);
        store.close_window(ghost);
        store.minimize_window(ghost);
        store.restore_window(ghost);
        store.update_window_position(ghost, Position::new(1, 1));
        store.update_window_size(ghost, Size::new(1, 1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.active_window_id(), Some(a));
    }

    #[test]
    fn maximize_commits_toggled_record() {
        let mut store = store();
        let a = store.open_window(WindowSpec::new("A", "about"));
        let toggled = toggle_maximize(store.window(a).unwrap());
        store.maximize_window(a, &toggled);
        let record = store.window(a).unwrap();
        assert!(record.is_maximized);
        assert_eq!(record.pre_maximize_geometry, Some(record.geometry()));
    }
}
