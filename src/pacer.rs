use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::time::sleep;

/// Suspends the distributor between transfers.
pub trait Pacer {
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer and shows a spinner for the length of the wait.
pub struct SpinnerPacer;

impl Pacer for SpinnerPacer {
    async fn pause(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
            spinner.set_style(style);
        }
        spinner.set_message(format!(
            "waiting {:.1}s before next transfer",
            duration.as_secs_f64()
        ));
        spinner.enable_steady_tick(Duration::from_millis(120));
        sleep(duration).await;
        spinner.finish_and_clear();
    }
}
