//! 仓储接口

mod company_repository;
mod embedded_repository;

pub use company_repository::*;
pub use embedded_repository::*;
