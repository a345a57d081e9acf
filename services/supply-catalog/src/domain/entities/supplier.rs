//! 供应商

use serde::{Deserialize, Serialize};

use super::{Company, EmbeddedEntity};
use crate::domain::value_objects::EmbeddedArray;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub country: String,
    pub city: String,
}

impl EmbeddedEntity for Supplier {
    const ARRAY: EmbeddedArray = EmbeddedArray::Suppliers;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn collection(company: &Company) -> &Vec<Self> {
        &company.suppliers
    }

    fn collection_mut(company: &mut Company) -> &mut Vec<Self> {
        &mut company.suppliers
    }
}
