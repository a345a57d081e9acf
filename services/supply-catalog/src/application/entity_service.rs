//! 内嵌实体应用服务
//!
//! 负责分配 ID、记录日志与 metrics，然后委托给仓储。

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use catalog_errors::AppResult;
use catalog_telemetry::record_repository_operation;
use tracing::{debug, info, warn};

use crate::domain::entities::{EmbeddedEntity, Related};
use crate::domain::repositories::{EmbeddedRepository, RelationRepository};

/// 单类实体的应用服务
pub struct EntityService<E: EmbeddedEntity, R: ?Sized = dyn EmbeddedRepository<E>> {
    repo: Arc<R>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: EmbeddedEntity, R: ?Sized> Clone for EntityService<E, R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E, R> EntityService<E, R>
where
    E: EmbeddedEntity,
    R: EmbeddedRepository<E> + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            _entity: PhantomData,
        }
    }

    async fn observe<T, F>(&self, operation: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let entity = E::ARRAY.entity_name();
        let start = Instant::now();
        let result = fut.await;
        record_repository_operation(entity, operation, result.is_ok(), start.elapsed());

        if let Err(e) = &result {
            if e.is_client_error() {
                debug!(entity, operation, error = %e, "Repository operation rejected");
            } else {
                warn!(entity, operation, error = %e, "Repository operation failed");
            }
        }
        result
    }

    /// 分配新 ID 后追加，返回保存的实体
    pub async fn add(&self, mut entity: E) -> AppResult<E> {
        entity.assign_new_id();
        self.observe("add", self.repo.add(&entity)).await?;
        info!(entity = E::ARRAY.entity_name(), id = %entity.id(), "Entity added");
        Ok(entity)
    }

    pub async fn update(&self, entity: E) -> AppResult<E> {
        self.observe("update", self.repo.update(&entity)).await?;
        info!(entity = E::ARRAY.entity_name(), id = %entity.id(), "Entity updated");
        Ok(entity)
    }

    pub async fn get_all(&self) -> AppResult<Vec<E>> {
        self.observe("get_all", self.repo.get_all()).await
    }

    pub async fn get_one(&self, id: &str) -> AppResult<E> {
        self.observe("get_one", self.repo.get_one(id)).await
    }

    pub async fn delete_one(&self, id: &str) -> AppResult<()> {
        self.observe("delete_one", self.repo.delete_one(id)).await?;
        info!(entity = E::ARRAY.entity_name(), id = %id, "Entity deleted");
        Ok(())
    }
}

impl<E, R> EntityService<E, R>
where
    E: Related,
    R: RelationRepository<E> + ?Sized,
{
    /// 关联实体 id 匹配的元素
    pub async fn get_by_relation(&self, related_id: &str) -> AppResult<Vec<E>> {
        self.observe("get_by_relation", self.repo.get_by_relation(related_id))
            .await
    }
}
