//! common - 通用类型和工具库

pub mod id;
pub mod utils;

pub use id::*;
pub use utils::*;
