pub mod debug_logger;
pub mod state;
