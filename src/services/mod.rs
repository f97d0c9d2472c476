pub mod layout;
pub mod live_position;
pub mod settings;
