mod input;
mod keybinds;
mod page_ui;

pub use input::{Config as InputConfig, Event as InputEvent};
pub use keybinds::Keybinds;
pub use page_ui::UI;
