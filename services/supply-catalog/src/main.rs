//! supply-catalog Service

use catalog_bootstrap::{Infrastructure, run_http};
use catalog_config::StoreBackend;
use tracing::info;

use supply_catalog::api;
use supply_catalog::application::CatalogService;
use supply_catalog::domain::value_objects::CompanyName;
use supply_catalog::infrastructure::persistence::InMemoryCatalogStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_http("config", |infra: Infrastructure| async move {
        info!("Initializing supply-catalog Service...");

        let company = CompanyName::new(&infra.config().company.name);
        let catalog = match infra.config().store.backend {
            StoreBackend::Postgres => {
                CatalogService::postgres(infra.document_collection().await?, company)
            }
            StoreBackend::Memory => CatalogService::in_memory(InMemoryCatalogStore::new(), company),
        };
        info!(company = %catalog.company.name(), "Repositories initialized");

        Ok(api::router(catalog, infra.metrics_handle()))
    })
    .await
}
