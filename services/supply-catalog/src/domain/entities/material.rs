//! 物料
//!
//! 内嵌的 supplier 是写入时的快照，供应商后续更新不会同步到这里。

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Company, EmbeddedEntity, Related, Supplier};
use crate::domain::value_objects::EmbeddedArray;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub supplier: Supplier,
    pub origin: String,
    pub sustainable: bool,
    pub details: String,
    /// 最近一次下单日期，原样保存调用方传入的字符串
    #[serde(rename = "lastOrder")]
    pub last_order: String,
}

impl EmbeddedEntity for Material {
    const ARRAY: EmbeddedArray = EmbeddedArray::Materials;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn collection(company: &Company) -> &Vec<Self> {
        &company.materials
    }

    fn collection_mut(company: &mut Company) -> &mut Vec<Self> {
        &mut company.materials
    }
}

impl Related for Material {
    const RELATION: EmbeddedArray = EmbeddedArray::Suppliers;

    fn relates_to(&self, related_id: &str) -> bool {
        self.supplier.id == related_id
    }

    fn relation_pattern(related_id: &str) -> serde_json::Value {
        json!({ "supplier": { "id": related_id } })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_wire_format() {
        let material: Material = serde_json::from_value(json!({
            "name": "Organic cotton",
            "supplier": { "id": "S-1718000000000001ABC", "name": "Acme" },
            "origin": "IN",
            "sustainable": true,
            "lastOrder": "2024-05-01"
        }))
        .unwrap();

        assert_eq!(material.id, "");
        assert_eq!(material.supplier.name, "Acme");
        assert_eq!(material.supplier.country, "");
        assert_eq!(material.last_order, "2024-05-01");

        let value = serde_json::to_value(&material).unwrap();
        assert_eq!(value["lastOrder"], "2024-05-01");
        assert!(value.get("last_order").is_none());
    }

    #[test]
    fn test_relates_to_supplier() {
        let material = Material {
            supplier: Supplier {
                id: "S-1".into(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(material.relates_to("S-1"));
        assert!(!material.relates_to("S-2"));
        assert_eq!(
            Material::relation_pattern("S-1"),
            json!({ "supplier": { "id": "S-1" } })
        );
    }
}
