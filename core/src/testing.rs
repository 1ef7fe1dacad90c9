pub mod program;
pub mod result;
pub mod runner;
pub mod testcase;

pub use program::*;
pub use result::*;
pub use runner::*;
pub use testcase::*;
