use crate::error::{QcError, Result};
use crate::plot::PlotBundle;

/// The plot inputs as JSON, for re-rendering with other tools.
pub fn plot_bundle_bytes(bundle: &PlotBundle) -> Result<Vec<u8>> {
    serde_json::to_vec(bundle).map_err(|e| QcError::io("<plot bundle>", std::io::Error::from(e)))
}
