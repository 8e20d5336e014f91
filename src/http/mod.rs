pub mod response_result;
pub mod server;
pub mod server_environment;
pub mod signature;
