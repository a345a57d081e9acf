//! catalog-bootstrap - 统一服务启动骨架

mod infrastructure;
mod runtime;
mod starter;

pub use infrastructure::*;
pub use runtime::*;
pub use starter::*;
