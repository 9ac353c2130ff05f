//! Tools page state using The Elm Architecture (TEA) pattern
//!
//! Key handling turns input into a [`Message`], [`State::update`] applies it.

use crate::tools::ToolDescriptor;

/// Everything the page reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
    Select,
    Rescan,
    Exit,
    /// Rows available for the list changed
    Resize(usize),
}

#[derive(Debug)]
pub struct State {
    /// Tools in page order
    pub tools: Vec<ToolDescriptor>,
    /// Focused tool
    pub selected: Option<usize>,
    /// First visible row
    pub scroll_offset: usize,
    /// Rows the list panel can show
    pub visible_rows: usize,
    /// Don't wrap around at the first/last tool
    pub hard_stop: bool,
    pub should_exit: bool,
    pub should_launch: bool,
    pub should_rescan: bool,
}

impl State {
    pub fn new(tools: Vec<ToolDescriptor>, hard_stop: bool) -> Self {
        let selected = if tools.is_empty() { None } else { Some(0) };
        Self {
            tools,
            selected,
            scroll_offset: 0,
            visible_rows: 1,
            hard_stop,
            should_exit: false,
            should_launch: false,
            should_rescan: false,
        }
    }

    pub fn selected_tool(&self) -> Option<&ToolDescriptor> {
        self.selected.and_then(|idx| self.tools.get(idx))
    }

    /// Swap in a rebuilt list, keeping scroll position and focus where
    /// they still fit
    pub fn replace_tools(&mut self, tools: Vec<ToolDescriptor>) {
        self.tools = tools;
        self.should_rescan = false;

        self.selected = match (self.selected, self.tools.len()) {
            (_, 0) => None,
            (Some(idx), len) => Some(idx.min(len - 1)),
            (None, _) => Some(0),
        };
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        self.ensure_visible();
    }

    fn max_scroll(&self) -> usize {
        self.tools.len().saturating_sub(self.visible_rows.max(1))
    }

    /// Scroll so the focused tool is on screen
    fn ensure_visible(&mut self) {
        let rows = self.visible_rows.max(1);
        if let Some(sel) = self.selected {
            if sel < self.scroll_offset {
                self.scroll_offset = sel;
            } else if sel >= self.scroll_offset + rows {
                self.scroll_offset = sel + 1 - rows;
            }
        }
    }

    fn move_by(&mut self, delta: isize) {
        let len = self.tools.len();
        let Some(sel) = self.selected else {
            return;
        };
        if len == 0 {
            return;
        }

        let target = sel as isize + delta;
        let next = if target < 0 {
            if self.hard_stop || delta.unsigned_abs() > 1 {
                0
            } else {
                len - 1
            }
        } else if target as usize >= len {
            if self.hard_stop || delta.unsigned_abs() > 1 {
                len - 1
            } else {
                0
            }
        } else {
            target as usize
        };

        self.selected = Some(next);
        self.ensure_visible();
    }

    pub fn update(&mut self, msg: Message) {
        match msg {
            Message::Up => self.move_by(-1),
            Message::Down => self.move_by(1),
            Message::PageUp => self.move_by(-(self.visible_rows.max(1) as isize)),
            Message::PageDown => self.move_by(self.visible_rows.max(1) as isize),
            Message::First => {
                if !self.tools.is_empty() {
                    self.selected = Some(0);
                    self.ensure_visible();
                }
            }
            Message::Last => {
                if !self.tools.is_empty() {
                    self.selected = Some(self.tools.len() - 1);
                    self.ensure_visible();
                }
            }
            Message::Select => {
                if self.selected_tool().is_some() {
                    self.should_launch = true;
                    self.should_exit = true;
                }
            }
            Message::Rescan => self.should_rescan = true,
            Message::Exit => self.should_exit = true,
            Message::Resize(rows) => {
                self.visible_rows = rows.max(1);
                self.scroll_offset = self.scroll_offset.min(self.max_scroll());
                self.ensure_visible();
            }
        }
    }
}
