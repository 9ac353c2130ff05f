//! Terminal input on a background thread
//!
//! Key presses and ticks arrive over an mpsc channel so the draw loop can
//! block on a single receiver.

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Builder for `Input`
#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub exit_key: KeyCode,
    pub tick_rate: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exit_key: KeyCode::Null,
            tick_rate: Duration::from_millis(250),
        }
    }
}

impl Config {
    /// Creates a new `Input` with the configuration in `Self`
    pub fn init(self) -> Input {
        Input::with_config(self)
    }
}

#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
    /// Terminal was resized
    Resize,
}

pub struct Input {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _input_handle: thread::JoinHandle<()>,
    _tick_handle: thread::JoinHandle<()>,
}

impl Input {
    pub fn with_config(config: Config) -> Self {
        let (tx, rx) = mpsc::channel();

        let _input_handle = {
            let tx = tx.clone();

            thread::spawn(move || loop {
                if let Ok(true) = crossterm::event::poll(Duration::from_millis(100)) {
                    match crossterm::event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            // KeyPress only, some platforms also report releases
                            if key.kind != KeyEventKind::Press {
                                continue;
                            }
                            if tx.send(Event::Input(key)).is_err() {
                                return;
                            }
                            if key.code == config.exit_key {
                                return;
                            }
                        }
                        Ok(CrosstermEvent::Resize(_, _)) => {
                            if tx.send(Event::Resize).is_err() {
                                return;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => return,
                    }
                }
            })
        };

        let _tick_handle = {
            thread::spawn(move || loop {
                if tx.send(Event::Tick).is_err() {
                    break;
                }
                thread::sleep(config.tick_rate);
            })
        };

        Self {
            rx,
            _input_handle,
            _tick_handle,
        }
    }

    /// Next event from the user or the ticker.
    pub fn next(&self) -> Result<Event<KeyEvent>, mpsc::RecvError> {
        self.rx.recv()
    }
}
