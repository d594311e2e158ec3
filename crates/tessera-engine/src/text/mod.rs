//! Bitmap-font text drawn through the sprite batcher.

mod metrics;
mod printer;
mod value;

pub use metrics::{FontMetrics, FontMetricsError};
pub use printer::{TextPrinter, TextStyle};
pub use value::{truncate_digits, PrintValue};
