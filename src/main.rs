//! tagwrap binary entry point.

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use tagwrap::config::Config;
use tagwrap::pipeline::{self, ProgressCallback, ProgressEvent};
use tagwrap::{cli, logging};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    logging::init(matches.get_flag(cli::ARG_VERBOSE));

    let config = Config::from_matches(&matches)?;
    let quiet = matches.get_flag(cli::ARG_QUIET);

    let bar = (!quiet).then(progress_bar);
    let callback = bar.as_ref().map(|bar| progress_callback(bar.clone()));

    let result = pipeline::run_job(&config, callback);

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let report = result?;
    println!("Wrote {}", report.output_path.display());
    Ok(())
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_draw_target(ProgressDrawTarget::stderr());
    let style =
        ProgressStyle::with_template("{spinner:.green} {msg:12} [{bar:40.cyan/blue}] {pos:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn progress_callback(handle: ProgressBar) -> ProgressCallback {
    Box::new(move |event| match event {
        ProgressEvent::StageStarted {
            stage,
            index,
            total,
        } => {
            handle.set_position(0);
            handle.set_message(format!("{stage} ({index}/{total})"));
        }
        ProgressEvent::Encoding { percent } => {
            handle.set_position(u64::from(percent));
        }
        ProgressEvent::Finished => {
            handle.set_position(100);
        }
    })
}
