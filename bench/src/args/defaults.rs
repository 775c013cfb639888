use std::num::{NonZeroU32, NonZeroU64, NonZeroUsize};

pub const DEFAULT_CONCURRENCY: NonZeroU32 = nonzero_lit::u32!(1);
pub const DEFAULT_REQUESTS: NonZeroU32 = nonzero_lit::u32!(1);

/// Request count used when only a time limit is given.
pub const DEFAULT_REQUESTS_WITH_TIME_LIMIT: NonZeroU32 = nonzero_lit::u32!(50_000);

pub const DEFAULT_REQUEST_TIMEOUT_SECS: NonZeroU64 = nonzero_lit::u64!(30);
pub const DEFAULT_QUEUE_CAPACITY: NonZeroUsize = nonzero_lit::usize!(100);
pub const DEFAULT_SKIP_TLS_VALIDATION: bool = false;
