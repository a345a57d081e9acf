//! 内嵌实体的公共行为

use catalog_common::generate_id;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Company;
use crate::domain::value_objects::EmbeddedArray;

/// 存放在根文档某个数组中的实体
pub trait EmbeddedEntity:
    Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    /// 所在数组
    const ARRAY: EmbeddedArray;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// 根文档中对应的数组
    fn collection(company: &Company) -> &Vec<Self>;

    fn collection_mut(company: &mut Company) -> &mut Vec<Self>;

    /// 分配新的带前缀 ID，覆盖调用方传入的值
    fn assign_new_id(&mut self) {
        self.set_id(generate_id(Self::ARRAY.id_prefix()));
    }
}

/// 内嵌了另一实体快照、可按其 ID 查询的实体
pub trait Related: EmbeddedEntity {
    /// 关联实体所在数组
    const RELATION: EmbeddedArray;

    /// 是否引用了给定 ID 的关联实体
    fn relates_to(&self, related_id: &str) -> bool;

    /// 匹配该关联的 JSON 片段（文档包含查询使用）
    fn relation_pattern(related_id: &str) -> serde_json::Value;
}
