pub mod plot_bundle;
pub mod qc_table;
