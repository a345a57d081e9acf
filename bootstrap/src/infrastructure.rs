//! 基础设施资源管理

use catalog_adapter_postgres::{DocumentCollection, PostgresConfig, create_pool};
use catalog_config::{AppConfig, StoreBackend};
use catalog_errors::{AppError, AppResult};
use metrics_exporter_prometheus::PrometheusHandle;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::{info, warn};

/// 基础设施资源容器
///
/// 由 bootstrap 统一初始化，服务通过闭包拿到它来组装仓储
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// PostgreSQL 连接池（内存后端时为空）
    postgres_pool: Option<PgPool>,
    /// Prometheus 句柄（recorder 已被安装时为空）
    metrics: Option<PrometheusHandle>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let postgres_pool = match config.store.backend {
            StoreBackend::Postgres => {
                let url = config.database.url.as_ref().ok_or_else(|| {
                    AppError::configuration("database.url is required for the postgres backend")
                })?;
                let pg_config = PostgresConfig::new(url.expose_secret())
                    .with_max_connections(config.database.max_connections)
                    .with_connect_timeout(config.store.timeout());
                let pool = create_pool(&pg_config).await?;
                info!(
                    "PostgreSQL connection pool created (max_connections: {})",
                    config.database.max_connections
                );
                Some(pool)
            }
            StoreBackend::Memory => {
                warn!("Using in-memory store, data is lost on restart");
                None
            }
        };

        let metrics = match catalog_telemetry::init_metrics() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "Prometheus recorder not installed");
                None
            }
        };

        Ok(Self {
            config,
            postgres_pool,
            metrics,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn metrics_handle(&self) -> Option<PrometheusHandle> {
        self.metrics.clone()
    }

    /// 打开配置的文档集合并确保表存在
    pub async fn document_collection(&self) -> AppResult<DocumentCollection> {
        let pool = self.postgres_pool.clone().ok_or_else(|| {
            AppError::configuration("document collection requires the postgres backend")
        })?;

        let collection = DocumentCollection::new(
            pool,
            self.config.database.collection.clone(),
            self.config.store.timeout(),
        )?;
        collection.ensure_table().await?;
        info!(table = %collection.table(), "Document collection opened");
        Ok(collection)
    }
}
