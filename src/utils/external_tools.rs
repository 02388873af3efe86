use crate::error::{QcError, Result};
use log::debug;
use std::process::Command;

pub fn check_samtools() -> Result<()> {
    Command::new("samtools")
        .arg("--version")
        .output()
        .map_err(|e| QcError::ExternalTool {
            tool: "samtools".to_string(),
            message: format!(
                "not found ({}). Please install samtools (http://www.htslib.org/) and ensure it's in your PATH",
                e
            ),
        })
        .map(|_| ())
}

/// Runs samtools with `args` and returns its stdout.
///
/// A spawn failure, a non-zero exit, or non-UTF-8 output is an error.
pub fn run_samtools(args: &[&str]) -> Result<String> {
    debug!("Running samtools {}", args.join(" "));
    let tool_error = |message: String| QcError::ExternalTool {
        tool: format!("samtools {}", args.first().copied().unwrap_or_default()),
        message,
    };

    let output = Command::new("samtools")
        .args(args)
        .output()
        .map_err(|e| tool_error(format!("could not be started: {}", e)))?;

    if !output.status.success() {
        return Err(tool_error(format!(
            "exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    String::from_utf8(output.stdout).map_err(|e| tool_error(format!("produced non-UTF-8 output: {}", e)))
}
