pub mod contacts;
pub mod import;
pub mod init;
pub mod models;
pub mod suggest;
