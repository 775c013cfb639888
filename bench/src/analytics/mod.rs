pub mod aggregator;
pub mod record;
pub mod report_builder;
pub mod statistics;
