pub mod config;
pub mod countdown;
pub mod feed;
pub mod filter;
pub mod http_client;
pub mod scoreboard_fetch;
pub mod state;
