//! Library components of the `bomgroup` command-line tool.

pub mod input;
pub mod logging;
pub mod types;
