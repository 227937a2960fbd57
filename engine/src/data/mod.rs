pub mod csv_loader;
pub mod dataset;
