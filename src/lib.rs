// Calendar outline library
// Day-group borders, badges and filtering for the events calendar grid

pub mod dom;
pub mod models;
pub mod services;
pub mod utils;
