pub mod csv_loader;
pub mod decode;
pub mod error;
pub mod header;
