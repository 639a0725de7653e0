mod progress;
mod progress_style;

pub use progress::message_spinner;
pub use progress_style::ProgressStyleTemplate;
