//! 产品
//!
//! materials 保存的是物料快照，不是引用。

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

use super::{Company, EmbeddedEntity, Material, Related};
use crate::domain::value_objects::EmbeddedArray;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub made_in: String,
    pub materials: Vec<Material>,
    /// JSON 数字；`null` 按 0 处理
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "price_or_zero"
    )]
    pub price: Decimal,
    pub description: String,
    #[serde(rename = "sustainablePackage")]
    pub sustainable_package: bool,
}

fn price_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(rust_decimal::serde::float_option::deserialize(deserializer)?.unwrap_or(Decimal::ZERO))
}

impl EmbeddedEntity for Product {
    const ARRAY: EmbeddedArray = EmbeddedArray::Products;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn collection(company: &Company) -> &Vec<Self> {
        &company.products
    }

    fn collection_mut(company: &mut Company) -> &mut Vec<Self> {
        &mut company.products
    }
}

impl Related for Product {
    const RELATION: EmbeddedArray = EmbeddedArray::Materials;

    fn relates_to(&self, related_id: &str) -> bool {
        self.materials.iter().any(|m| m.id == related_id)
    }

    fn relation_pattern(related_id: &str) -> serde_json::Value {
        json!({ "materials": [{ "id": related_id }] })
    }
}
