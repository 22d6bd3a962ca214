pub mod init;
pub mod projects;
pub mod stories;
