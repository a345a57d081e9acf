//! PostgreSQL 仓储集成测试
//!
//! 需要可用的数据库: DATABASE_URL=postgres://... cargo test -- --ignored

use std::time::Duration;

use catalog_adapter_postgres::{DocumentCollection, PostgresConfig, create_pool};
use chrono::Utc;
use serde_json::json;
use supply_catalog::application::CatalogService;
use supply_catalog::domain::entities::{Material, Product, Supplier};
use supply_catalog::domain::repositories::{EmbeddedRepository, InitOutcome};
use supply_catalog::domain::value_objects::CompanyName;
use supply_catalog::infrastructure::persistence::PostgresEmbeddedRepository;

async fn collection() -> DocumentCollection {
    collection_with_timeout(Duration::from_secs(10)).await
}

async fn collection_with_timeout(timeout: Duration) -> DocumentCollection {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = create_pool(&PostgresConfig::new(url)).await.unwrap();

    let table = format!("catalog_test_{}", Utc::now().timestamp_micros());
    let collection = DocumentCollection::new(pool, table, timeout).unwrap();
    collection.ensure_table().await.unwrap();
    collection
}

async fn drop_table(collection: &DocumentCollection) {
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", collection.table()))
        .execute(collection.pool())
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn test_postgres_crud_cycle() {
    let collection = collection().await;
    let catalog = CatalogService::postgres(collection.clone(), CompanyName::new("green leaf"));

    assert_eq!(catalog.company.initialize().await.unwrap(), InitOutcome::Created);
    assert_eq!(catalog.company.initialize().await.unwrap(), InitOutcome::AlreadyExists);
    assert_eq!(catalog.company.root_count().await.unwrap(), 1);
    catalog.company.ping().await.unwrap();

    let acme = catalog
        .suppliers
        .add(Supplier {
            name: "Acme".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    let second = catalog
        .suppliers
        .add(Supplier {
            name: "Second".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    let mut renamed = acme.clone();
    renamed.city = "Porto".into();
    catalog.suppliers.update(renamed.clone()).await.unwrap();
    assert_eq!(catalog.suppliers.get_one(&acme.id).await.unwrap(), renamed);
    assert_eq!(
        catalog.suppliers.get_all().await.unwrap(),
        vec![renamed.clone(), second.clone()]
    );

    let hemp = catalog
        .materials
        .add(Material {
            name: "Hemp".into(),
            supplier: renamed.clone(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        catalog.materials.get_by_relation(&acme.id).await.unwrap(),
        vec![hemp.clone()]
    );

    let tote = catalog
        .products
        .add(Product {
            name: "Tote".into(),
            materials: vec![hemp.clone()],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        catalog.products.get_by_relation(&hemp.id).await.unwrap(),
        vec![tote]
    );
    assert!(
        catalog
            .products
            .get_by_relation("M-1718000000000999ZZZ")
            .await
            .unwrap()
            .is_empty()
    );

    catalog.suppliers.delete_one(&acme.id).await.unwrap();
    assert_eq!(
        catalog.suppliers.get_one(&acme.id).await.unwrap_err().status_code(),
        404
    );
    assert_eq!(catalog.suppliers.get_all().await.unwrap(), vec![second]);
    assert_eq!(
        catalog.suppliers.delete_one(&acme.id).await.unwrap_err().status_code(),
        404
    );

    drop_table(&collection).await;
}

#[tokio::test]
#[ignore]
async fn test_postgres_missing_root_and_field() {
    let collection = collection().await;

    let repo =
        PostgresEmbeddedRepository::<Supplier>::new(collection.clone(), CompanyName::new("nobody"));
    assert!(repo.get_all().await.unwrap().is_empty());
    assert_eq!(
        repo.add(&Supplier::default()).await.unwrap_err().status_code(),
        404
    );

    collection
        .insert_root_if_absent("Broken", &json!({ "name": "Broken" }))
        .await
        .unwrap();
    let broken =
        PostgresEmbeddedRepository::<Supplier>::new(collection.clone(), CompanyName::new("broken"));
    assert_eq!(broken.get_all().await.unwrap_err().status_code(), 500);

    drop_table(&collection).await;
}

#[tokio::test]
#[ignore]
async fn test_postgres_locked_table_times_out() {
    let collection = collection_with_timeout(Duration::from_millis(500)).await;
    let catalog = CatalogService::postgres(collection.clone(), CompanyName::new("green leaf"));
    catalog.company.initialize().await.unwrap();

    let sql = format!("LOCK TABLE {} IN ACCESS EXCLUSIVE MODE", collection.table());
    let mut lock = collection.pool().begin().await.unwrap();
    sqlx::query(&sql).execute(&mut *lock).await.unwrap();

    let err = catalog.suppliers.get_all().await.unwrap_err();
    assert_eq!(err.status_code(), 504);

    lock.rollback().await.unwrap();
    assert!(catalog.suppliers.get_all().await.unwrap().is_empty());

    drop_table(&collection).await;
}

#[tokio::test]
#[ignore]
async fn test_postgres_concurrent_push_and_pull() {
    let collection = collection().await;
    let catalog = CatalogService::postgres(collection.clone(), CompanyName::new("green leaf"));
    catalog.company.initialize().await.unwrap();

    let adds = (0..50).map(|i| {
        let suppliers = catalog.suppliers.clone();
        async move {
            suppliers
                .add(Supplier {
                    name: format!("Supplier {i}"),
                    ..Default::default()
                })
                .await
        }
    });
    let saved = futures::future::try_join_all(adds).await.unwrap();
    assert_eq!(catalog.suppliers.get_all().await.unwrap().len(), 50);

    let target = saved[0].id.clone();
    let deletes = (0..10).map(|_| {
        let suppliers = catalog.suppliers.clone();
        let id = target.clone();
        async move { suppliers.delete_one(&id).await }
    });
    let results = futures::future::join_all(deletes).await;

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| e.status_code() == 404)
    );
    assert_eq!(catalog.suppliers.get_all().await.unwrap().len(), 49);

    drop_table(&collection).await;
}
