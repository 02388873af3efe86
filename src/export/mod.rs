pub mod formats;
mod staged;

pub use formats::plot_bundle::plot_bundle_bytes;
pub use formats::qc_table::{qc_table_bytes, write_qc_table};
pub use staged::StagedOutputs;
