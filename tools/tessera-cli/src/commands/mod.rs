pub mod info;
pub mod init;
pub mod plan;
pub mod validate;
