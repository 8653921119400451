// Service module exports
// Render pipeline, filtering and file-backed services

pub mod badge;
pub mod border;
pub mod day_groups;
pub mod filter;
pub mod grid_metrics;
pub mod schedule;
pub mod settings;
pub mod shape;
pub mod snapshot;
pub mod surface;
