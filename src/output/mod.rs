pub mod ordering;
pub mod writer;
