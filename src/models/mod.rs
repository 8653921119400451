// Module exports for models

pub mod calendar_response;
pub mod day_group;
pub mod filter;
pub mod geometry;
pub mod grid;
pub mod settings;
pub mod shape;
