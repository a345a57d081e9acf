//! 应用层

mod catalog;
mod company_service;
mod entity_service;

pub use catalog::*;
pub use company_service::*;
pub use entity_service::*;
