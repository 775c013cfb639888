pub mod stop_signal;
pub mod time_limit;
