use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_STRINGS: &[&str] = &[
    "▹▹▹▹▹", "▸▹▹▹▹", "▹▸▹▹▹", "▹▹▸▹▹", "▹▹▹▸▹", "▹▹▹▹▸", "▪▪▪▪▪",
];

/// Spinner shown on stderr while a cluster job runs. Hidden when stderr is not a terminal.
pub fn create_job_spinner(snapshot_name: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    let style = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
        .map(|style| style.tick_strings(TICK_STRINGS))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    pb.set_style(style);
    pb.set_message(format!("Creating snapshot {}", snapshot_name));
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}
