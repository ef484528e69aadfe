pub mod numeric;
pub mod opts;
