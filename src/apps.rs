//! Application renderer: maps a window's component identifier to the view
//! drawn inside its frame.

use std::collections::BTreeMap;

use indoc::indoc;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::window::{WindowId, WindowRecord};

pub const NOT_FOUND_MESSAGE: &str = "Application not found";

/// What a view may look at while drawing.
#[derive(Debug, Clone, Copy)]
pub struct AppContext<'a> {
    pub window_id: WindowId,
    pub focused: bool,
    pub windows: &'a [WindowRecord],
}

pub trait AppView: std::fmt::Debug {
    fn render(&self, buf: &mut Buffer, area: Rect, ctx: &AppContext<'_>);
}

/// Fallback for unknown component identifiers.
#[derive(Debug, Default)]
pub struct NotFoundView;

impl AppView for NotFoundView {
    fn render(&self, buf: &mut Buffer, area: Rect, _ctx: &AppContext<'_>) {
        Paragraph::new(NOT_FOUND_MESSAGE)
            .style(Style::default().add_modifier(Modifier::DIM))
            .render(area, buf);
    }
}

/// Fixed, wrapped text.
#[derive(Debug)]
pub struct TextView {
    body: &'static str,
}

impl TextView {
    pub const fn new(body: &'static str) -> Self {
        Self { body }
    }
}

impl AppView for TextView {
    fn render(&self, buf: &mut Buffer, area: Rect, _ctx: &AppContext<'_>) {
        Paragraph::new(self.body)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

/// Live listing of every window's stored geometry.
#[derive(Debug, Default)]
pub struct InspectorView;

impl AppView for InspectorView {
    fn render(&self, buf: &mut Buffer, area: Rect, ctx: &AppContext<'_>) {
        let mut windows: Vec<&WindowRecord> = ctx.windows.iter().collect();
        windows.sort_by_key(|w| w.id);
        let lines: Vec<Line> = windows
            .into_iter()
            .map(|w| {
                let state = if w.is_minimized {
                    "min"
                } else if w.is_maximized {
                    "max"
                } else {
                    "   "
                };
                let line = format!(
                    "{} {state} {:>5},{:<5} {:>5}x{:<5} z{} {}",
                    w.id, w.position.x, w.position.y, w.size.width, w.size.height, w.z_index, w.title
                );
                if w.id == ctx.window_id {
                    Line::styled(line, Style::default().add_modifier(Modifier::BOLD))
                } else {
                    Line::raw(line)
                }
            })
            .collect();
        Paragraph::new(Text::from(lines)).render(area, buf);
    }
}

const ABOUT: &str = indoc! {"
    viewport-wm

    Drag a window by its title bar, resize it from the
    bottom-right corner, double-click the title bar to
    maximize or restore.

    Ctrl+N opens a window, Ctrl+Q quits.
"};

const README: &str = indoc! {"
    Windows keep their top-left corner inside the screen
    and never shrink below the minimum size. Maximized
    windows fill the screen above the bottom bar and
    return to exactly where they were when restored.
"};

#[derive(Debug)]
pub struct AppRegistry {
    views: BTreeMap<String, Box<dyn AppView>>,
    fallback: NotFoundView,
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AppRegistry {
    pub fn new() -> Self {
        Self {
            views: BTreeMap::new(),
            fallback: NotFoundView,
        }
    }

    /// Registry with the views the desktop ships with.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("about", TextView::new(ABOUT));
        registry.register("readme", TextView::new(README));
        registry.register("inspector", InspectorView);
        registry
    }

    pub fn register(&mut self, component: impl Into<String>, view: impl AppView + 'static) {
        self.views.insert(component.into(), Box::new(view));
    }

    pub fn contains(&self, component: &str) -> bool {
        self.views.contains_key(component)
    }

    /// Never fails: unknown identifiers get the not-found view.
    pub fn resolve(&self, component: &str) -> &dyn AppView {
        match self.views.get(component) {
            Some(view) => view.as_ref(),
            None => &self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_text(view: &dyn AppView, windows: &[WindowRecord]) -> String {
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        let ctx = AppContext {
            window_id: WindowId(1),
            focused: true,
            windows,
        };
        view.render(&mut buf, area, &ctx);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn unknown_component_resolves_to_placeholder() {
        let registry = AppRegistry::with_builtin();
        assert!(!registry.contains("doom"));
        let text = render_text(registry.resolve("doom"), &[]);
        assert!(text.contains(NOT_FOUND_MESSAGE));
    }

    #[test]
    fn builtin_views_resolve() {
        let registry = AppRegistry::with_builtin();
        for component in ["about", "readme", "inspector"] {
            assert!(registry.contains(component));
        }
        let text = render_text(registry.resolve("about"), &[]);
        assert!(text.contains("viewport-wm"));
    }

    #[test]
    fn inspector_lists_geometry() {
        let mut record = WindowRecord::new(WindowId(1), "Notes", "inspector");
        record.position = crate::geometry::Position::new(12, 34);
        let text = render_text(&InspectorView, &[record]);
        assert!(text.contains("Notes"));
        assert!(text.contains("12,34"));
    }
}
