//! Bottom bar: one entry per open window plus a host label on the right.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::ui::{fill, rect_contains, safe_set_string, truncate_to_width};
use crate::window::{WindowId, WindowRecord};

fn label_width(label: &str) -> u16 {
    u16::try_from(label.chars().count()).unwrap_or(u16::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarEntry {
    pub id: WindowId,
    pub rect: Rect,
    pub label: String,
    pub minimized: bool,
    pub active: bool,
}

#[derive(Debug)]
pub struct BottomBar {
    host_label: String,
}

impl Default for BottomBar {
    fn default() -> Self {
        Self::new()
    }
}

impl BottomBar {
    pub fn new() -> Self {
        let host = hostname::get()
            .ok()
            .and_then(|s| s.into_string().ok())
            .unwrap_or_else(|| "unknown-host".to_string());
        Self::with_host_label(format!("{} · {host}", env!("CARGO_PKG_NAME")))
    }

    pub fn with_host_label(label: impl Into<String>) -> Self {
        Self {
            host_label: label.into(),
        }
    }

    /// Lay out window entries in opening order along the bar's first row,
    /// leaving room for the host label.
    pub fn entries(
        &self,
        windows: &[WindowRecord],
        active: Option<WindowId>,
        area: Rect,
    ) -> Vec<BarEntry> {
        let mut entries = Vec::new();
        if area.width == 0 || area.height == 0 {
            return entries;
        }
        let host_width = label_width(&self.host_label).saturating_add(1);
        let max_x = area.right().saturating_sub(host_width).max(area.x);
        let mut sorted: Vec<&WindowRecord> = windows.iter().collect();
        sorted.sort_by_key(|w| w.id);

        let mut x = area.x.saturating_add(1);
        for window in sorted {
            let label = format!(" {} ", window.label());
            let width = label_width(&label);
            if x.saturating_add(width) > max_x {
                break;
            }
            entries.push(BarEntry {
                id: window.id,
                rect: Rect::new(x, area.y, width, 1),
                label,
                minimized: window.is_minimized,
                active: active == Some(window.id),
            });
            x = x.saturating_add(width).saturating_add(1);
        }
        entries
    }

    pub fn hit_test(
        &self,
        windows: &[WindowRecord],
        active: Option<WindowId>,
        area: Rect,
        column: u16,
        row: u16,
    ) -> Option<WindowId> {
        self.entries(windows, active, area)
            .into_iter()
            .find(|entry| rect_contains(entry.rect, column, row))
            .map(|entry| entry.id)
    }

    pub fn render(
        &self,
        buf: &mut Buffer,
        area: Rect,
        windows: &[WindowRecord],
        active: Option<WindowId>,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bar_style = Style::default().bg(Color::Black).fg(Color::Gray);
        fill(buf, area, bar_style);

        for entry in self.entries(windows, active, area) {
            let style = if entry.active {
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else if entry.minimized {
                bar_style.add_modifier(Modifier::DIM)
            } else {
                bar_style.fg(Color::White)
            };
            safe_set_string(buf, area, entry.rect.x, entry.rect.y, &entry.label, style);
        }

        let label = truncate_to_width(&self.host_label, area.width as usize);
        let x = area.right().saturating_sub(label_width(&label));
        safe_set_string(buf, area, x, area.y, &label, bar_style);
    }
}
