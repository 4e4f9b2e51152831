use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a UniProt request is in flight.
pub(crate) fn network_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
