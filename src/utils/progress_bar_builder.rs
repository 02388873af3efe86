use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Spinner used to report the stages of a QC run on stderr.
pub(crate) struct ProgressBarBuilder {
    style_template: &'static str,
    message: String,
    hidden: bool,
    tick: Option<Duration>,
}

impl ProgressBarBuilder {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            style_template: "{spinner:.green} [{elapsed_precise}] {msg}",
            message: message.into(),
            hidden: false,
            tick: None,
        }
    }

    /// Suppresses drawing, e.g. when log output would interleave with the spinner.
    pub(crate) fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub(crate) fn with_tick(mut self, interval: Duration) -> Self {
        self.tick = Some(interval);
        self
    }

    pub(crate) fn build(self) -> Result<ProgressBar> {
        let pb = ProgressBar::new_spinner();
        if self.hidden {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }

        pb.set_style(ProgressStyle::default_spinner().template(self.style_template)?);
        pb.set_message(self.message);

        if let Some(interval) = self.tick {
            pb.enable_steady_tick(interval);
        }

        Ok(pb)
    }
}
