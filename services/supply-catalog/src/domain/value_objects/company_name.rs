//! 公司名称（根文档查找键）

use catalog_common::title_case;
use derive_more::Display;
use serde::Serialize;

/// 根文档的名称，始终为标题格式
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[display("{_0}")]
pub struct CompanyName(String);

impl CompanyName {
    /// 由原始名称构造，去除首尾空白并转换为标题格式
    pub fn new(raw: &str) -> Self {
        Self(title_case(raw.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
