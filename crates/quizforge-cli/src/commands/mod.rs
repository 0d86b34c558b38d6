pub mod build;
pub mod init;
pub mod list;
pub mod output;
pub mod run;
pub mod show;
pub mod validate;
