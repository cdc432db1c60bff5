pub mod formatting;

pub use formatting::{format_mean, format_percent};
