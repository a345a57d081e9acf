//! 认证

use serde::{Deserialize, Serialize};

use super::{Company, EmbeddedEntity};
use crate::domain::value_objects::EmbeddedArray;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cert {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub details: String,
}

impl EmbeddedEntity for Cert {
    const ARRAY: EmbeddedArray = EmbeddedArray::Certs;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn collection(company: &Company) -> &Vec<Self> {
        &company.certs
    }

    fn collection_mut(company: &mut Company) -> &mut Vec<Self> {
        &mut company.certs
    }
}
