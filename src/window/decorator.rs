use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};

const MINIMIZE_GLYPH: &str = "_";
const MAXIMIZE_GLYPH: &str = "□";
const RESTORE_GLYPH: &str = "❐";
const CLOSE_GLYPH: &str = "×";
const RESIZE_GLYPH: &str = "◢";

/// Cell regions of a decorated window frame.
///
/// The header is the top row minus the three control buttons on its right.
/// The resize handle is the bottom-right corner cell. Regions collapse to
/// empty rects when the frame is too small to hold them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowChrome {
    pub frame: Rect,
    pub header: Rect,
    pub minimize: Rect,
    pub maximize: Rect,
    pub close: Rect,
    pub resize_handle: Rect,
    pub content: Rect,
}

impl WindowChrome {
    pub fn for_frame(frame: Rect) -> Self {
        let empty = Rect::default();
        if frame.width < 8 || frame.height < 3 {
            return Self {
                frame,
                header: Rect { height: frame.height.min(1), ..frame },
                minimize: empty,
                maximize: empty,
                close: empty,
                resize_handle: empty,
                content: empty,
            };
        }
        let right = frame.x.saturating_add(frame.width).saturating_sub(1);
        let bottom = frame.y.saturating_add(frame.height).saturating_sub(1);
        let button = |offset: u16| Rect::new(right.saturating_sub(offset), frame.y, 1, 1);
        Self {
            frame,
            header: Rect::new(frame.x, frame.y, frame.width.saturating_sub(7), 1),
            minimize: button(5),
            maximize: button(3),
            close: button(1),
            resize_handle: Rect::new(right, bottom, 1, 1),
            content: Rect::new(
                frame.x.saturating_add(1),
                frame.y.saturating_add(1),
                frame.width.saturating_sub(2),
                frame.height.saturating_sub(2),
            ),
        }
    }
}

/// How the frame should be drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecorState {
    pub focused: bool,
    pub maximized: bool,
}

pub trait WindowDecorator: std::fmt::Debug {
    /// Paint the frame around `chrome.content`, never outside `clip`.
    fn render_window(
        &self,
        buf: &mut Buffer,
        chrome: &WindowChrome,
        clip: Rect,
        title: &str,
        state: DecorState,
    );
}

#[derive(Debug, Default)]
pub struct DefaultDecorator;

fn put(buf: &mut Buffer, clip: Rect, x: u16, y: u16, symbol: &str, style: Style) {
    if x < clip.x || y < clip.y || x >= clip.right() || y >= clip.bottom() {
        return;
    }
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

impl WindowDecorator for DefaultDecorator {
    fn render_window(
        &self,
        buf: &mut Buffer,
        chrome: &WindowChrome,
        clip: Rect,
        title: &str,
        state: DecorState,
    ) {
        let rect = chrome.frame;
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let header_style = if state.focused {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        let border_style = Style::default().fg(Color::DarkGray).bg(Color::Reset);
        let handle_style = Style::default().fg(Color::Gray).bg(Color::Reset);

        let left = rect.x;
        let top = rect.y;
        let right = rect.x.saturating_add(rect.width).saturating_sub(1);
        let bottom = rect.y.saturating_add(rect.height).saturating_sub(1);

        // Header bar.
        for x in left..=right {
            put(buf, clip, x, top, " ", header_style);
        }
        let title_room = chrome.header.width.saturating_sub(2) as usize;
        for (idx, ch) in title.chars().take(title_room).enumerate() {
            let x = left.saturating_add(1).saturating_add(idx as u16);
            put(buf, clip, x, top, &ch.to_string(), header_style);
        }
        if chrome.close.width > 0 {
            let maximize = if state.maximized {
                RESTORE_GLYPH
            } else {
                MAXIMIZE_GLYPH
            };
            put(buf, clip, chrome.minimize.x, top, MINIMIZE_GLYPH, header_style);
            put(buf, clip, chrome.maximize.x, top, maximize, header_style);
            put(buf, clip, chrome.close.x, top, CLOSE_GLYPH, header_style);
        }

        if rect.height < 2 {
            return;
        }
        // Sides.
        for y in top.saturating_add(1)..bottom {
            put(buf, clip, left, y, "│", border_style);
            put(buf, clip, right, y, "│", border_style);
        }
        // Bottom edge.
        for x in left..=right {
            let symbol = if x == left {
                "└"
            } else if x == right {
                "┘"
            } else {
                "─"
            };
            put(buf, clip, x, bottom, symbol, border_style);
        }
        if !state.maximized && chrome.resize_handle.width > 0 {
            put(buf, clip, right, bottom, RESIZE_GLYPH, handle_style);
        }
    }
}
