//! Process exit codes shared by all subcommands.

pub const SUCCESS: i32 = 0;
/// Analysis, serialization or output failed
pub const EXECUTION_ERROR: i32 = 1;
/// Bad arguments, configuration or input file
pub const INPUT_ERROR: i32 = 2;
