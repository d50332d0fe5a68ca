pub mod buffer_count;
pub mod distinct;
pub mod filter;
pub mod lift;
pub mod map;
pub mod observe_on;
pub mod reduce;
pub mod scan;
pub mod skip;
pub mod subscribe_on;
pub mod take;
