//! PostgreSQL repository implementation
//!
//! 公司根文档存放在 JSONB 文档集合中，四类实体共用同一套泛型实现。

use std::marker::PhantomData;

use async_trait::async_trait;
use catalog_adapter_postgres::{ArrayFetch, DocumentCollection, check_connection};
use catalog_errors::AppResult;
use tracing::{debug, info};

use crate::domain::entities::{Company, EmbeddedEntity, Related};
use crate::domain::repositories::{
    CompanyRepository, EmbeddedRepository, InitOutcome, RelationRepository, company_not_found,
    element_not_found, field_missing,
};
use crate::domain::value_objects::CompanyName;

// ============================================================================
// EmbeddedRepository 实现
// ============================================================================

pub struct PostgresEmbeddedRepository<E> {
    collection: DocumentCollection,
    company: CompanyName,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PostgresEmbeddedRepository<E> {
    pub fn new(collection: DocumentCollection, company: CompanyName) -> Self {
        Self {
            collection,
            company,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: EmbeddedEntity> EmbeddedRepository<E> for PostgresEmbeddedRepository<E> {
    async fn add(&self, entity: &E) -> AppResult<()> {
        let pushed = self
            .collection
            .push(self.company.as_str(), E::ARRAY.field(), entity)
            .await?;

        if !pushed {
            return Err(company_not_found(&self.company));
        }
        debug!(array = %E::ARRAY, id = %entity.id(), "Element pushed");
        Ok(())
    }

    async fn update(&self, entity: &E) -> AppResult<()> {
        let replaced = self
            .collection
            .replace(self.company.as_str(), E::ARRAY.field(), entity.id(), entity)
            .await?;

        if !replaced {
            return Err(element_not_found::<E>(entity.id()));
        }
        debug!(array = %E::ARRAY, id = %entity.id(), "Element replaced");
        Ok(())
    }

    async fn get_all(&self) -> AppResult<Vec<E>> {
        match self
            .collection
            .fetch_array::<E>(self.company.as_str(), E::ARRAY.field())
            .await?
        {
            ArrayFetch::RootMissing => Ok(Vec::new()),
            ArrayFetch::FieldMissing => Err(field_missing::<E>(&self.company)),
            ArrayFetch::Elements(elements) => Ok(elements),
        }
    }

    async fn get_one(&self, id: &str) -> AppResult<E> {
        self.collection
            .find_element::<E>(self.company.as_str(), E::ARRAY.field(), id)
            .await?
            .ok_or_else(|| element_not_found::<E>(id))
    }

    async fn delete_one(&self, id: &str) -> AppResult<()> {
        let removed = self
            .collection
            .pull(self.company.as_str(), E::ARRAY.field(), id)
            .await?;

        if !removed {
            return Err(element_not_found::<E>(id));
        }
        debug!(array = %E::ARRAY, id = %id, "Element pulled");
        Ok(())
    }
}

#[async_trait]
impl<E: Related> RelationRepository<E> for PostgresEmbeddedRepository<E> {
    async fn get_by_relation(&self, related_id: &str) -> AppResult<Vec<E>> {
        self.collection
            .find_containing::<E>(
                self.company.as_str(),
                E::ARRAY.field(),
                &E::relation_pattern(related_id),
            )
            .await
    }
}

// ============================================================================
// CompanyRepository 实现
// ============================================================================

pub struct PostgresCompanyRepository {
    collection: DocumentCollection,
}

impl PostgresCompanyRepository {
    pub fn new(collection: DocumentCollection) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn initialize(&self, company: &Company) -> AppResult<InitOutcome> {
        let created = self
            .collection
            .insert_root_if_absent(&company.name, company)
            .await?;

        if created {
            info!(company = %company.name, "Created new company document");
            Ok(InitOutcome::Created)
        } else {
            info!(company = %company.name, "Company document already exists");
            Ok(InitOutcome::AlreadyExists)
        }
    }

    async fn count(&self, name: &CompanyName) -> AppResult<u64> {
        let count = self.collection.count_roots(name.as_str()).await?;
        Ok(count.max(0) as u64)
    }

    async fn ping(&self) -> AppResult<()> {
        check_connection(self.collection.pool(), self.collection.timeout()).await
    }
}
