pub mod date;
pub mod debounce;
