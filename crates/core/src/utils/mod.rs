pub mod amounts;
pub mod time_utils;
