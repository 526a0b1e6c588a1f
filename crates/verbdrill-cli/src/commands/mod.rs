pub mod init;
pub mod list_presets;
pub mod serve;
pub mod validate;
