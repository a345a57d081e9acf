//! 根文档中的内嵌数组

use derive_more::Display;

/// 根文档的四个内嵌数组字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EmbeddedArray {
    #[display("products")]
    Products,
    #[display("materials")]
    Materials,
    #[display("suppliers")]
    Suppliers,
    #[display("certs")]
    Certs,
}

impl EmbeddedArray {
    /// 文档中的字段名
    pub fn field(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Materials => "materials",
            Self::Suppliers => "suppliers",
            Self::Certs => "certs",
        }
    }

    /// 单个元素的名称，用于日志和错误信息
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::Products => "product",
            Self::Materials => "material",
            Self::Suppliers => "supplier",
            Self::Certs => "cert",
        }
    }

    /// 生成 ID 时使用的前缀
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Products => "P-",
            Self::Materials => "M-",
            Self::Suppliers => "S-",
            Self::Certs => "CERT-",
        }
    }
}
