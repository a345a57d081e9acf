//! 公司根文档

use serde::{Deserialize, Serialize};

use super::{Cert, Material, Product, Supplier};
use crate::domain::value_objects::CompanyName;

/// 根文档，所有目录数据都内嵌在这里
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub certs: Vec<Cert>,
}

impl Company {
    /// 创建空的根文档
    pub fn new(name: &CompanyName) -> Self {
        Self {
            name: name.as_str().to_string(),
            ..Default::default()
        }
    }
}
