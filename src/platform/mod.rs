pub mod process;

pub use process::{CommandRunner, SystemRunner};
