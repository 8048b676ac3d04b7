pub mod init;
pub mod score;
pub mod validate;
pub mod zones;
