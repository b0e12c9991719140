pub mod file;

pub use file::{load_orders, save_orders};
