//! 目录服务装配

use std::sync::Arc;

use catalog_adapter_postgres::DocumentCollection;

use super::{CompanyService, EntityService};
use crate::domain::entities::{Cert, Material, Product, Supplier};
use crate::domain::repositories::{EmbeddedRepository, RelationRepository};
use crate::domain::value_objects::CompanyName;
use crate::infrastructure::persistence::{
    InMemoryCatalogStore, InMemoryCompanyRepository, InMemoryEmbeddedRepository,
    PostgresCompanyRepository, PostgresEmbeddedRepository,
};

pub type ProductService = EntityService<Product, dyn RelationRepository<Product>>;
pub type MaterialService = EntityService<Material, dyn RelationRepository<Material>>;
pub type SupplierService = EntityService<Supplier>;
pub type CertService = EntityService<Cert>;

/// 全部应用服务，所有仓储绑定同一个公司根文档
#[derive(Clone)]
pub struct CatalogService {
    pub company: CompanyService,
    pub products: ProductService,
    pub materials: MaterialService,
    pub suppliers: SupplierService,
    pub certs: CertService,
}

impl CatalogService {
    /// 基于 PostgreSQL 文档集合
    pub fn postgres(collection: DocumentCollection, company: CompanyName) -> Self {
        let products: Arc<dyn RelationRepository<Product>> = Arc::new(
            PostgresEmbeddedRepository::<Product>::new(collection.clone(), company.clone()),
        );
        let materials: Arc<dyn RelationRepository<Material>> = Arc::new(
            PostgresEmbeddedRepository::<Material>::new(collection.clone(), company.clone()),
        );
        let suppliers: Arc<dyn EmbeddedRepository<Supplier>> = Arc::new(
            PostgresEmbeddedRepository::<Supplier>::new(collection.clone(), company.clone()),
        );
        let certs: Arc<dyn EmbeddedRepository<Cert>> = Arc::new(
            PostgresEmbeddedRepository::<Cert>::new(collection.clone(), company.clone()),
        );
        let company_repo = Arc::new(PostgresCompanyRepository::new(collection));

        Self {
            company: CompanyService::new(company_repo, company),
            products: EntityService::new(products),
            materials: EntityService::new(materials),
            suppliers: EntityService::new(suppliers),
            certs: EntityService::new(certs),
        }
    }

    /// 基于内存存储
    pub fn in_memory(store: InMemoryCatalogStore, company: CompanyName) -> Self {
        let products: Arc<dyn RelationRepository<Product>> = Arc::new(
            InMemoryEmbeddedRepository::<Product>::new(store.clone(), company.clone()),
        );
        let materials: Arc<dyn RelationRepository<Material>> = Arc::new(
            InMemoryEmbeddedRepository::<Material>::new(store.clone(), company.clone()),
        );
        let suppliers: Arc<dyn EmbeddedRepository<Supplier>> = Arc::new(
            InMemoryEmbeddedRepository::<Supplier>::new(store.clone(), company.clone()),
        );
        let certs: Arc<dyn EmbeddedRepository<Cert>> = Arc::new(
            InMemoryEmbeddedRepository::<Cert>::new(store.clone(), company.clone()),
        );
        let company_repo = Arc::new(InMemoryCompanyRepository::new(store));

        Self {
            company: CompanyService::new(company_repo, company),
            products: EntityService::new(products),
            materials: EntityService::new(materials),
            suppliers: EntityService::new(suppliers),
            certs: EntityService::new(certs),
        }
    }
}
