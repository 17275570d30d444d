pub mod bucketing;
pub mod columns;
pub mod dataset;
pub mod engine;
pub mod features;
pub mod timestamps;
