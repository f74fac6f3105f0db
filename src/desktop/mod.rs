//! The desktop: lays out visible windows from the store, paints them, and
//! turns terminal mouse input into interaction-engine calls.
//!
//! Geometry lives in engine pixels. The terminal is mapped onto that space
//! through a [`CellScale`], so a pointer at cell `(column, row)` sits at
//! pixel `(column * cell_width, row * cell_height)`.

pub mod panel;

use std::time::{Duration, Instant};

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Clear, Widget};

use crate::apps::{AppContext, AppRegistry};
use crate::config::DesktopConfig;
use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};
use crate::drivers::pointer::PointerRoute;
use crate::engine::InteractionEngine;
use crate::geometry::{Geometry, Position, Viewport};
use crate::store::{MemoryStore, WindowSpec, WindowStore};
use crate::ui::{rect_contains, safe_set_string};
use crate::window::decorator::{DecorState, DefaultDecorator, WindowChrome, WindowDecorator};
use crate::window::WindowId;

use self::panel::BottomBar;

/// Pixels per terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScale {
    pub cell_width: i32,
    pub cell_height: i32,
}

impl Default for CellScale {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
        }
    }
}

impl CellScale {
    pub fn viewport_for(&self, screen: Rect) -> Viewport {
        Viewport::new(
            i32::from(screen.width) * self.cell_width,
            i32::from(screen.height) * self.cell_height,
        )
    }

    pub fn to_pixels(&self, column: u16, row: u16, screen: Rect) -> Position {
        Position::new(
            i32::from(column.saturating_sub(screen.x)) * self.cell_width,
            i32::from(row.saturating_sub(screen.y)) * self.cell_height,
        )
    }

    pub fn to_cells(&self, geometry: Geometry, screen: Rect) -> Rect {
        let cells = |value: i32, unit: i32| value.div_euclid(unit).clamp(0, i32::from(u16::MAX)) as u16;
        Rect::new(
            screen.x.saturating_add(cells(geometry.position.x, self.cell_width)),
            screen.y.saturating_add(cells(geometry.position.y, self.cell_height)),
            cells(geometry.size.width, self.cell_width),
            cells(geometry.size.height, self.cell_height),
        )
    }

    /// Whole rows needed to cover `pixels`.
    pub fn rows_for(&self, pixels: i32) -> u16 {
        let rows = pixels.max(0).saturating_add(self.cell_height - 1) / self.cell_height;
        rows.clamp(0, i32::from(u16::MAX)) as u16
    }
}

/// One visible window as the render loop sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDraw {
    pub id: WindowId,
    pub geometry: Geometry,
    pub chrome: WindowChrome,
    pub focused: bool,
    pub maximized: bool,
}

#[derive(Debug)]
pub struct Desktop {
    store: MemoryStore,
    engine: InteractionEngine<PointerRoute>,
    apps: AppRegistry,
    decorator: Box<dyn WindowDecorator>,
    panel: BottomBar,
    scale: CellScale,
    screen: Rect,
    double_click: Duration,
    last_header_click: Option<(WindowId, Instant)>,
}

impl Desktop {
    pub fn new(config: &DesktopConfig, screen: Rect) -> Self {
        let viewport = config.scale.viewport_for(screen);
        Self {
            store: MemoryStore::new(viewport, config.policy),
            engine: InteractionEngine::new(PointerRoute::new(), viewport).with_policy(config.policy),
            apps: AppRegistry::with_builtin(),
            decorator: Box::new(DefaultDecorator),
            panel: BottomBar::new(),
            scale: config.scale,
            screen,
            double_click: config.double_click,
            last_header_click: None,
        }
    }

    pub fn with_panel(mut self, panel: BottomBar) -> Self {
        self.panel = panel;
        self
    }

    pub fn open(&mut self, spec: WindowSpec) -> WindowId {
        self.store.open_window(spec)
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut MemoryStore {
        &mut self.store
    }

    pub fn engine(&self) -> &InteractionEngine<PointerRoute> {
        &self.engine
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn panel_area(&self) -> Rect {
        let rows = self
            .scale
            .rows_for(self.engine.policy().reserved_bottom)
            .min(self.screen.height);
        Rect::new(
            self.screen.x,
            self.screen.bottom().saturating_sub(rows),
            self.screen.width,
            rows,
        )
    }

    /// Screen minus the bottom bar.
    pub fn desk_area(&self) -> Rect {
        let panel = self.panel_area();
        Rect {
            height: self.screen.height.saturating_sub(panel.height),
            ..self.screen
        }
    }

    pub fn resize_screen(&mut self, screen: Rect) {
        if self.screen == screen {
            return;
        }
        self.screen = screen;
        let viewport = self.scale.viewport_for(screen);
        self.store.set_viewport(viewport);
        self.engine.set_viewport(&mut self.store, viewport);
    }

    /// Visible windows back to front, with their laid-out frames.
    pub fn draw_plan(&self) -> Vec<WindowDraw> {
        let viewport = self.engine.viewport();
        let policy = self.engine.policy();
        let active = self.store.active_window_id();
        self.store
            .visible_windows()
            .into_iter()
            .map(|record| {
                let geometry = policy.layout_geometry(record, viewport);
                WindowDraw {
                    id: record.id,
                    geometry,
                    chrome: WindowChrome::for_frame(self.scale.to_cells(geometry, self.screen)),
                    focused: active == Some(record.id),
                    maximized: record.is_maximized,
                }
            })
            .collect()
    }

    /// Route one terminal event. Returns whether the desktop consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Mouse(mouse) => {
                if self.engine.surface().accepts(event) {
                    if matches!(mouse.kind, MouseEventKind::Up(_)) {
                        self.engine.on_pointer_up();
                    } else {
                        let pointer = self.scale.to_pixels(mouse.column, mouse.row, self.screen);
                        self.engine.on_pointer_move(&mut self.store, pointer);
                    }
                    return true;
                }
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                    return self.pointer_down(mouse.column, mouse.row, Instant::now());
                }
                false
            }
            Event::Resize(width, height) => {
                self.resize_screen(Rect::new(0, 0, *width, *height));
                true
            }
            _ => false,
        }
    }

    /// Handle a primary-button press at a terminal cell. The topmost window
    /// under the pointer receives it.
    pub fn pointer_down(&mut self, column: u16, row: u16, now: Instant) -> bool {
        if rect_contains(self.panel_area(), column, row) {
            let hit = self.panel.hit_test(
                self.store.windows(),
                self.store.active_window_id(),
                self.panel_area(),
                column,
                row,
            );
            if let Some(id) = hit {
                self.store.restore_window(id);
            }
            return true;
        }

        let Some(draw) = self
            .draw_plan()
            .into_iter()
            .rev()
            .find(|draw| rect_contains(draw.chrome.frame, column, row))
        else {
            return false;
        };
        let id = draw.id;
        let chrome = draw.chrome;
        let pointer = self.scale.to_pixels(column, row, self.screen);

        if rect_contains(chrome.close, column, row) {
            self.last_header_click = None;
            self.store.close_window(id);
            return true;
        }
        self.store.focus_window(id);
        if rect_contains(chrome.minimize, column, row) {
            self.last_header_click = None;
            self.store.minimize_window(id);
        } else if rect_contains(chrome.maximize, column, row) {
            self.last_header_click = None;
            self.engine.toggle_maximize(&mut self.store, id);
        } else if rect_contains(chrome.header, column, row) {
            let double = self
                .last_header_click
                .is_some_and(|(prev, at)| prev == id && now.duration_since(at) <= self.double_click);
            if double {
                self.last_header_click = None;
                self.engine.toggle_maximize(&mut self.store, id);
            } else {
                self.last_header_click = Some((id, now));
                self.engine.start_drag(&mut self.store, id, pointer);
            }
        } else if rect_contains(chrome.resize_handle, column, row) && !draw.maximized {
            self.engine.start_resize(&mut self.store, id, pointer);
        }
        true
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.resize_screen(frame.area());
        self.render_into(frame.buffer_mut());
    }

    pub fn render_into(&self, buf: &mut Buffer) {
        let desk = self.desk_area();
        let plan = self.draw_plan();
        if plan.is_empty() {
            safe_set_string(
                buf,
                desk,
                desk.x.saturating_add(1),
                desk.y,
                "No windows. Ctrl+N opens one.",
                Style::default().add_modifier(Modifier::DIM),
            );
        }
        for draw in &plan {
            let Some(record) = self.store.window(draw.id) else {
                continue;
            };
            let visible = draw.chrome.frame.intersection(desk);
            if visible.is_empty() {
                continue;
            }
            Clear.render(visible, buf);
            self.decorator.render_window(
                buf,
                &draw.chrome,
                desk,
                &record.label(),
                DecorState {
                    focused: draw.focused,
                    maximized: draw.maximized,
                },
            );
            let content = draw.chrome.content.intersection(desk);
            if !content.is_empty() {
                let ctx = AppContext {
                    window_id: draw.id,
                    focused: draw.focused,
                    windows: self.store.windows(),
                };
                self.apps.resolve(&record.component).render(buf, content, &ctx);
            }
        }
        self.panel.render(
            buf,
            self.panel_area(),
            self.store.windows(),
            self.store.active_window_id(),
        );
    }
}
