//! 公司初始化服务

use std::sync::Arc;

use catalog_errors::AppResult;
use tracing::info;

use crate::domain::entities::Company;
use crate::domain::repositories::{CompanyRepository, InitOutcome};
use crate::domain::value_objects::CompanyName;

#[derive(Clone)]
pub struct CompanyService {
    repo: Arc<dyn CompanyRepository>,
    name: CompanyName,
}

impl CompanyService {
    pub fn new(repo: Arc<dyn CompanyRepository>, name: CompanyName) -> Self {
        Self { repo, name }
    }

    pub fn name(&self) -> &CompanyName {
        &self.name
    }

    /// 创建空的根文档，已存在时不做任何写入
    pub async fn initialize(&self) -> AppResult<InitOutcome> {
        let outcome = self.repo.initialize(&Company::new(&self.name)).await?;
        info!(company = %self.name, ?outcome, "Company initialization finished");
        Ok(outcome)
    }

    /// 同名根文档数量
    pub async fn root_count(&self) -> AppResult<u64> {
        self.repo.count(&self.name).await
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.repo.ping().await
    }
}
