// Salon Timeline Library
// Appointment layout engine: lanes, day geometry, week/month grids, now marker

pub mod models;
pub mod services;
pub mod utils;
