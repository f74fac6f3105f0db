pub mod decorator;

use std::fmt;

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::geometry::{Geometry, Position, Size};

/// Stable identifier of an open window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A window as held by the window store.
///
/// `position` and `size` describe the free-form geometry and only matter
/// while the window is not maximized. `pre_maximize_geometry` is the
/// snapshot taken on entering maximize and is what restore goes back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub icon: Option<char>,
    pub component: String,
    pub position: Position,
    pub size: Size,
    pub pre_maximize_geometry: Option<Geometry>,
    pub z_index: u32,
    pub is_minimized: bool,
    pub is_maximized: bool,
}

impl WindowRecord {
    pub fn new(id: WindowId, title: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            icon: None,
            component: component.into(),
            position: Position::default(),
            size: Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            pre_maximize_geometry: None,
            z_index: 0,
            is_minimized: false,
            is_maximized: false,
        }
    }

    /// Free-form geometry, regardless of the maximize flag.
    pub fn geometry(&self) -> Geometry {
        Geometry {
            position: self.position,
            size: self.size,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.is_minimized
    }

    /// Title prefixed with the icon glyph, when there is one.
    pub fn label(&self) -> String {
        match self.icon {
            Some(icon) => format!("{icon} {}", self.title),
            None => self.title.clone(),
        }
    }
}
