pub mod connection_times;
pub mod hardware;
pub mod params;
pub mod percentile;
pub mod report;
pub mod scheme;
pub mod summary;
