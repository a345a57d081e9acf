//! 公司根文档仓储接口

use async_trait::async_trait;
use catalog_errors::AppResult;

use crate::domain::entities::Company;
use crate::domain::value_objects::CompanyName;

/// 初始化结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyExists,
}

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// 同名根文档不存在时插入
    async fn initialize(&self, company: &Company) -> AppResult<InitOutcome>;

    /// 同名根文档数量
    async fn count(&self, name: &CompanyName) -> AppResult<u64>;

    /// 存储是否可用
    async fn ping(&self) -> AppResult<()>;
}
