pub mod amplicons;
pub mod qc;
