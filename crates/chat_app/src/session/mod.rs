//! Terminal session: owns the state, runs effects, draws the view.
mod app;
mod effects;
mod input;
mod render;
mod settings;

pub use app::run_app;
