pub mod hourly_record;
pub mod options;
pub mod policy;
pub mod season;
pub mod site_location;
