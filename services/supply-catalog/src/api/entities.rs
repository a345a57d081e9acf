//! 内嵌实体路由
//!
//! 四类实体共用同一组泛型 handler，路径沿用
//! `/{array}/add`, `/{array}/find-{entity}?id=`, `/{array}/delete-{entity}?id=` 等形式。

use std::collections::HashMap;

use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use catalog_common::title_case;
use catalog_errors::AppResult;

use super::params::{checked_id, json_body, required_id};
use crate::application::EntityService;
use crate::domain::entities::{EmbeddedEntity, Related};
use crate::domain::repositories::{EmbeddedRepository, RelationRepository};

/// 增删改查路由
pub fn entity_routes<E, R>(service: EntityService<E, R>) -> Router
where
    E: EmbeddedEntity,
    R: EmbeddedRepository<E> + ?Sized + 'static,
{
    crud_routes::<E, R>().with_state(service)
}

/// 增删改查 + 按关联实体查询的路由
pub fn related_entity_routes<E, R>(service: EntityService<E, R>) -> Router
where
    E: Related,
    R: RelationRepository<E> + ?Sized + 'static,
{
    let relation_path = format!("/find-by-{}", E::RELATION.entity_name());

    crud_routes::<E, R>()
        .route(&relation_path, get(get_by_relation::<E, R>))
        .with_state(service)
}

fn crud_routes<E, R>() -> Router<EntityService<E, R>>
where
    E: EmbeddedEntity,
    R: EmbeddedRepository<E> + ?Sized + 'static,
{
    let name = E::ARRAY.entity_name();

    Router::new()
        .route("/add", post(add::<E, R>))
        .route("/update", put(update::<E, R>))
        .route("/all", get(get_all::<E, R>))
        .route(&format!("/find-{}", name), get(get_one::<E, R>))
        .route(&format!("/delete-{}", name), delete(delete_one::<E, R>))
}

async fn add<E, R>(
    State(service): State<EntityService<E, R>>,
    payload: Result<Json<E>, JsonRejection>,
) -> AppResult<(StatusCode, Json<E>)>
where
    E: EmbeddedEntity,
    R: EmbeddedRepository<E> + ?Sized + 'static,
{
    let entity = json_body(payload)?;
    let saved = service.add(entity).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update<E, R>(
    State(service): State<EntityService<E, R>>,
    payload: Result<Json<E>, JsonRejection>,
) -> AppResult<Json<E>>
where
    E: EmbeddedEntity,
    R: EmbeddedRepository<E> + ?Sized + 'static,
{
    let entity = json_body(payload)?;
    checked_id(entity.id())?;
    Ok(Json(service.update(entity).await?))
}

async fn get_all<E, R>(State(service): State<EntityService<E, R>>) -> AppResult<Json<Vec<E>>>
where
    E: EmbeddedEntity,
    R: EmbeddedRepository<E> + ?Sized + 'static,
{
    Ok(Json(service.get_all().await?))
}

async fn get_one<E, R>(
    State(service): State<EntityService<E, R>>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<E>>
where
    E: EmbeddedEntity,
    R: EmbeddedRepository<E> + ?Sized + 'static,
{
    let id = required_id(&params, "id")?;
    Ok(Json(service.get_one(id).await?))
}

async fn delete_one<E, R>(
    State(service): State<EntityService<E, R>>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<String>>
where
    E: EmbeddedEntity,
    R: EmbeddedRepository<E> + ?Sized + 'static,
{
    let id = required_id(&params, "id")?;
    service.delete_one(id).await?;
    Ok(Json(format!("{} deleted", title_case(E::ARRAY.entity_name()))))
}

async fn get_by_relation<E, R>(
    State(service): State<EntityService<E, R>>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<E>>>
where
    E: Related,
    R: RelationRepository<E> + ?Sized + 'static,
{
    let key = format!("{}_id", E::RELATION.entity_name());
    let related_id = required_id(&params, &key)?;
    Ok(Json(service.get_by_relation(related_id).await?))
}
