pub mod auth;
pub mod kv;
