//! 内嵌实体仓储接口

use async_trait::async_trait;
use catalog_errors::{AppError, AppResult};

use crate::domain::entities::{EmbeddedEntity, Related};
use crate::domain::value_objects::CompanyName;

/// 根文档某个数组上的 CRUD
///
/// 实现在构造时绑定公司名称，每次调用都作用于同一个根文档。
#[async_trait]
pub trait EmbeddedRepository<E: EmbeddedEntity>: Send + Sync {
    /// 追加到数组末尾；根文档不存在时返回 NotFound
    async fn add(&self, entity: &E) -> AppResult<()>;

    /// 原位替换 id 相同的元素；没有匹配时返回 NotFound
    async fn update(&self, entity: &E) -> AppResult<()>;

    /// 按插入顺序返回全部元素；根文档不存在时返回空列表
    async fn get_all(&self) -> AppResult<Vec<E>>;

    /// 第一个 id 匹配的元素
    async fn get_one(&self, id: &str) -> AppResult<E>;

    /// 移除 id 匹配的元素；没有匹配时返回 NotFound
    async fn delete_one(&self, id: &str) -> AppResult<()>;
}

/// 支持按关联实体查询的仓储
#[async_trait]
pub trait RelationRepository<E: Related>: EmbeddedRepository<E> {
    /// 关联实体 id 匹配的全部元素，没有匹配时返回空列表
    async fn get_by_relation(&self, related_id: &str) -> AppResult<Vec<E>>;
}

/// 元素不存在
pub fn element_not_found<E: EmbeddedEntity>(id: &str) -> AppError {
    AppError::not_found(format!("{} with ID {} not found", E::ARRAY.entity_name(), id))
}

/// 根文档不存在
pub fn company_not_found(company: &CompanyName) -> AppError {
    AppError::not_found(format!("company '{}' is not initialized", company))
}

/// 根文档缺少数组字段
pub fn field_missing<E: EmbeddedEntity>(company: &CompanyName) -> AppError {
    AppError::structural(format!(
        "field '{}' not found in company '{}'",
        E::ARRAY.field(),
        company
    ))
}
