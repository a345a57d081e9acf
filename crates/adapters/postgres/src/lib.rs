//! catalog-adapter-postgres - PostgreSQL 适配器
//!
//! 以 JSONB 列承载文档，提供内嵌数组的读写原语

mod connection;
mod document;

pub use connection::*;
pub use document::*;
