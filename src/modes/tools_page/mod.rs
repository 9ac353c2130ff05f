//! Tools page: numbered buttons for every discovered tool

mod build;
mod run;

pub use run::{run, run_list, run_name};
