pub mod cache_utils;
pub mod common_types;
pub mod connect;
pub mod fiat_rates;
