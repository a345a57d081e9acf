//! 内存存储
//!
//! 与 PostgreSQL 实现语义一致，用于测试和本地运行。
//! 每个操作在一次写锁/读锁内完成，对应数据库的单行原子更新。

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use catalog_errors::AppResult;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{Company, EmbeddedEntity, Related};
use crate::domain::repositories::{
    CompanyRepository, EmbeddedRepository, InitOutcome, RelationRepository, company_not_found,
    element_not_found,
};
use crate::domain::value_objects::CompanyName;

/// 共享的根文档集合
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogStore {
    companies: Arc<RwLock<Vec<Company>>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前全部根文档的拷贝
    pub async fn snapshot(&self) -> Vec<Company> {
        self.companies.read().await.clone()
    }
}

// ============================================================================
// EmbeddedRepository 实现
// ============================================================================

pub struct InMemoryEmbeddedRepository<E> {
    store: InMemoryCatalogStore,
    company: CompanyName,
    _entity: PhantomData<fn() -> E>,
}

impl<E> InMemoryEmbeddedRepository<E> {
    pub fn new(store: InMemoryCatalogStore, company: CompanyName) -> Self {
        Self {
            store,
            company,
            _entity: PhantomData,
        }
    }
}

fn find_company<'a>(companies: &'a [Company], name: &CompanyName) -> Option<&'a Company> {
    companies.iter().find(|c| c.name == name.as_str())
}

fn find_company_mut<'a>(
    companies: &'a mut [Company],
    name: &CompanyName,
) -> Option<&'a mut Company> {
    companies.iter_mut().find(|c| c.name == name.as_str())
}

#[async_trait]
impl<E: EmbeddedEntity> EmbeddedRepository<E> for InMemoryEmbeddedRepository<E> {
    async fn add(&self, entity: &E) -> AppResult<()> {
        let mut companies = self.store.companies.write().await;
        let company = find_company_mut(&mut companies, &self.company)
            .ok_or_else(|| company_not_found(&self.company))?;

        E::collection_mut(company).push(entity.clone());
        debug!(array = %E::ARRAY, id = %entity.id(), "Element pushed");
        Ok(())
    }

    async fn update(&self, entity: &E) -> AppResult<()> {
        let mut companies = self.store.companies.write().await;
        let slot = find_company_mut(&mut companies, &self.company)
            .and_then(|company| {
                E::collection_mut(company)
                    .iter_mut()
                    .find(|existing| existing.id() == entity.id())
            })
            .ok_or_else(|| element_not_found::<E>(entity.id()))?;

        *slot = entity.clone();
        debug!(array = %E::ARRAY, id = %entity.id(), "Element replaced");
        Ok(())
    }

    async fn get_all(&self) -> AppResult<Vec<E>> {
        let companies = self.store.companies.read().await;
        Ok(find_company(&companies, &self.company)
            .map(|company| E::collection(company).clone())
            .unwrap_or_default())
    }

    async fn get_one(&self, id: &str) -> AppResult<E> {
        let companies = self.store.companies.read().await;
        find_company(&companies, &self.company)
            .and_then(|company| E::collection(company).iter().find(|e| e.id() == id))
            .cloned()
            .ok_or_else(|| element_not_found::<E>(id))
    }

    async fn delete_one(&self, id: &str) -> AppResult<()> {
        let mut companies = self.store.companies.write().await;
        let elements = find_company_mut(&mut companies, &self.company)
            .map(E::collection_mut)
            .ok_or_else(|| element_not_found::<E>(id))?;

        let before = elements.len();
        elements.retain(|e| e.id() != id);
        if elements.len() == before {
            return Err(element_not_found::<E>(id));
        }
        debug!(array = %E::ARRAY, id = %id, "Element pulled");
        Ok(())
    }
}

#[async_trait]
impl<E: Related> RelationRepository<E> for InMemoryEmbeddedRepository<E> {
    async fn get_by_relation(&self, related_id: &str) -> AppResult<Vec<E>> {
        let companies = self.store.companies.read().await;
        Ok(find_company(&companies, &self.company)
            .map(|company| {
                E::collection(company)
                    .iter()
                    .filter(|e| e.relates_to(related_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

// ============================================================================
// CompanyRepository 实现
// ============================================================================

pub struct InMemoryCompanyRepository {
    store: InMemoryCatalogStore,
}

impl InMemoryCompanyRepository {
    pub fn new(store: InMemoryCatalogStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn initialize(&self, company: &Company) -> AppResult<InitOutcome> {
        let mut companies = self.store.companies.write().await;
        if companies.iter().any(|c| c.name == company.name) {
            return Ok(InitOutcome::AlreadyExists);
        }
        companies.push(company.clone());
        Ok(InitOutcome::Created)
    }

    async fn count(&self, name: &CompanyName) -> AppResult<u64> {
        let companies = self.store.companies.read().await;
        Ok(companies.iter().filter(|c| c.name == name.as_str()).count() as u64)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
