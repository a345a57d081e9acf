//! 持久化实现

mod memory;
mod postgres;

pub use memory::*;
pub use postgres::*;
