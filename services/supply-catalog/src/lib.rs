//! supply-catalog - 公司供应链目录服务
//!
//! 一个公司根文档内嵌产品、物料、供应商和认证四个数组，
//! 所有操作都作用在这一个根文档上。

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
