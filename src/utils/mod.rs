pub mod external_tools;
pub(crate) mod input;
pub(crate) mod natural_sort;
pub(crate) mod progress_bar_builder;
pub mod safe_math;
