pub mod logger;

pub use logger::{STORAGE, log_press};
