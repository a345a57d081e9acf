//! 目录服务行为测试（内存存储）

use std::str::FromStr;

use rust_decimal::Decimal;
use supply_catalog::application::CatalogService;
use supply_catalog::domain::entities::{Cert, Material, Product, Supplier};
use supply_catalog::domain::repositories::InitOutcome;
use supply_catalog::domain::value_objects::CompanyName;
use supply_catalog::infrastructure::persistence::InMemoryCatalogStore;
use tokio_test::assert_ok;

async fn initialized_catalog() -> (CatalogService, InMemoryCatalogStore) {
    let store = InMemoryCatalogStore::new();
    let catalog = CatalogService::in_memory(store.clone(), CompanyName::new("green leaf"));
    assert_ok!(catalog.company.initialize().await);
    (catalog, store)
}

fn supplier(name: &str) -> Supplier {
    Supplier {
        name: name.to_string(),
        country: "PT".to_string(),
        city: "Porto".to_string(),
        ..Default::default()
    }
}

fn is_supplier_id(id: &str) -> bool {
    let Some(rest) = id.strip_prefix("S-") else {
        return false;
    };
    if rest.len() < 7 {
        return false;
    }
    let (digits, letters) = rest.split_at(rest.len() - 3);
    digits.len() >= 4
        && digits.chars().all(|c| c.is_ascii_digit())
        && letters.chars().all(|c| c.is_ascii_uppercase())
}

#[tokio::test]
async fn test_add_then_get_one() {
    let (catalog, _) = initialized_catalog().await;

    let saved = catalog.suppliers.add(supplier("Acme")).await.unwrap();
    assert!(is_supplier_id(&saved.id), "unexpected id {}", saved.id);

    let fetched = catalog.suppliers.get_one(&saved.id).await.unwrap();
    assert_eq!(fetched, saved);
}

#[tokio::test]
async fn test_add_overrides_caller_id() {
    let (catalog, _) = initialized_catalog().await;

    let mut cert = Cert {
        name: "GOTS".to_string(),
        ..Default::default()
    };
    cert.id = "CERT-caller-chosen".to_string();

    let saved = catalog.certs.add(cert).await.unwrap();
    assert!(saved.id.starts_with("CERT-"));
    assert_ne!(saved.id, "CERT-caller-chosen");
}

#[tokio::test]
async fn test_update_preserves_id() {
    let (catalog, _) = initialized_catalog().await;
    let saved = catalog.suppliers.add(supplier("Acme")).await.unwrap();

    let mut changed = saved.clone();
    changed.city = "Lisbon".to_string();
    catalog.suppliers.update(changed).await.unwrap();

    let fetched = catalog.suppliers.get_one(&saved.id).await.unwrap();
    assert_eq!(fetched.id, saved.id);
    assert_eq!(fetched.city, "Lisbon");
    assert_eq!(catalog.suppliers.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_then_not_found() {
    let (catalog, _) = initialized_catalog().await;
    let keep = catalog.suppliers.add(supplier("Keep")).await.unwrap();
    let gone = catalog.suppliers.add(supplier("Gone")).await.unwrap();

    catalog.suppliers.delete_one(&gone.id).await.unwrap();

    let err = catalog.suppliers.get_one(&gone.id).await.unwrap_err();
    assert_eq!(err.status_code(), 404);

    let all = catalog.suppliers.get_all().await.unwrap();
    assert_eq!(all, vec![keep]);

    let err = catalog.suppliers.delete_one(&gone.id).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_get_all_keeps_insertion_order() {
    let (catalog, _) = initialized_catalog().await;

    let mut ids = Vec::new();
    for i in 0..5 {
        let saved = catalog
            .suppliers
            .add(supplier(&format!("Supplier {i}")))
            .await
            .unwrap();
        ids.push(saved.id);
    }

    let listed: Vec<String> = catalog
        .suppliers
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_update_unknown_leaves_store_unchanged() {
    let (catalog, store) = initialized_catalog().await;
    catalog
        .materials
        .add(Material {
            name: "Hemp".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let before = store.snapshot().await;

    let err = catalog
        .materials
        .update(Material {
            id: "M-1718000000000999ZZZ".to_string(),
            name: "Ghost".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 404);
    assert_eq!(store.snapshot().await, before);
}

#[tokio::test]
async fn test_find_products_by_material() {
    let (catalog, _) = initialized_catalog().await;
    let cotton = catalog
        .materials
        .add(Material {
            name: "Cotton".to_string(),
            sustainable: true,
            ..Default::default()
        })
        .await
        .unwrap();

    let tote = catalog
        .products
        .add(Product {
            name: "Tote".to_string(),
            materials: vec![cotton.clone()],
            price: Decimal::from_str("19.99").unwrap(),
            ..Default::default()
        })
        .await
        .unwrap();
    catalog
        .products
        .add(Product {
            name: "Mug".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let found = catalog.products.get_by_relation(&cotton.id).await.unwrap();
    assert_eq!(found, vec![tote]);

    let none = catalog
        .products
        .get_by_relation("M-nonexistent")
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_find_materials_by_supplier() {
    let (catalog, _) = initialized_catalog().await;
    let acme = catalog.suppliers.add(supplier("Acme")).await.unwrap();

    let hemp = catalog
        .materials
        .add(Material {
            name: "Hemp".to_string(),
            supplier: acme.clone(),
            ..Default::default()
        })
        .await
        .unwrap();

    let found = catalog.materials.get_by_relation(&acme.id).await.unwrap();
    assert_eq!(found, vec![hemp]);
}

#[tokio::test]
async fn test_embedded_snapshot_not_synced() {
    let (catalog, _) = initialized_catalog().await;
    let acme = catalog.suppliers.add(supplier("Acme")).await.unwrap();
    let hemp = catalog
        .materials
        .add(Material {
            name: "Hemp".to_string(),
            supplier: acme.clone(),
            ..Default::default()
        })
        .await
        .unwrap();

    let mut renamed = acme.clone();
    renamed.name = "Acme Renamed".to_string();
    catalog.suppliers.update(renamed).await.unwrap();

    let material = catalog.materials.get_one(&hemp.id).await.unwrap();
    assert_eq!(material.supplier.name, "Acme");
}

#[tokio::test]
async fn test_initialize_twice_keeps_one_root() {
    let (catalog, _) = initialized_catalog().await;

    let outcome = catalog.company.initialize().await.unwrap();
    assert_eq!(outcome, InitOutcome::AlreadyExists);
    assert_eq!(catalog.company.root_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_operations_before_initialize() {
    let catalog = CatalogService::in_memory(InMemoryCatalogStore::new(), CompanyName::new("acme"));

    assert!(catalog.certs.get_all().await.unwrap().is_empty());

    let err = catalog
        .certs
        .add(Cert {
            name: "FSC".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_companies_are_isolated() {
    let store = InMemoryCatalogStore::new();
    let first = CatalogService::in_memory(store.clone(), CompanyName::new("first"));
    let second = CatalogService::in_memory(store.clone(), CompanyName::new("second"));
    first.company.initialize().await.unwrap();
    second.company.initialize().await.unwrap();

    first.suppliers.add(supplier("Only First")).await.unwrap();

    assert_eq!(first.suppliers.get_all().await.unwrap().len(), 1);
    assert!(second.suppliers.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_adds_are_not_lost() {
    let (catalog, _) = initialized_catalog().await;

    let adds = (0..20).map(|i| {
        let suppliers = catalog.suppliers.clone();
        async move { suppliers.add(supplier(&format!("Supplier {i}"))).await }
    });
    let saved: Vec<Supplier> = futures::future::try_join_all(adds).await.unwrap();

    let mut ids: Vec<String> = saved.into_iter().map(|s| s.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
    assert_eq!(catalog.suppliers.get_all().await.unwrap().len(), 20);
}
