// Module exports for models

pub mod appointment;
pub mod interval;
pub mod settings;
pub mod ui;
