use std::time::Duration;

use indicatif::ProgressBar;

use crate::utils::ProgressStyleTemplate;

pub fn message_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyleTemplate::only_message());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
