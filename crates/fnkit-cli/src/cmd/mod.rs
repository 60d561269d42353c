pub mod add;
pub mod attach;
pub mod config;
pub mod function;
pub mod init;
pub mod instance;
