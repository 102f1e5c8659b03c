pub mod discord;
pub mod server_info;
