pub mod analyze;
pub mod bind;
pub mod check;
mod command_result;
pub mod context;
pub mod helper;
pub mod init;

pub use command_result::*;
