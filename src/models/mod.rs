pub mod analytics;
pub mod matches;
