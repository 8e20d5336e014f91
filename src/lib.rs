pub mod http;
pub mod nba;
pub mod slack;
pub mod utils;
