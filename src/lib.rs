pub mod cli;
pub mod controls;
pub mod imagery;
pub mod layers;
pub mod map;
pub mod model;
pub mod recipe;
pub mod runtime;
pub mod script;
pub mod service;

mod document;

#[cfg(test)]
mod testing;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
