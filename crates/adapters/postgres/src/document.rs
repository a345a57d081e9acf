//! JSONB 文档集合
//!
//! 每行是一个根文档 (`name` 为主键, `document` 为 JSONB)。
//! 内嵌数组的所有写操作都是单条 UPDATE，依赖行级原子性，
//! 元素位置在 SET 表达式中基于最新行版本计算。

use std::future::Future;
use std::time::Duration;

use catalog_errors::{AppError, AppResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::debug;

/// 读取内嵌数组的结果
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayFetch<T> {
    /// 根文档不存在
    RootMissing,
    /// 根文档存在但没有该字段
    FieldMissing,
    Elements(Vec<T>),
}

/// 校验表名是否为普通 SQL 标识符
fn validate_identifier(name: &str) -> AppResult<()> {
    let mut chars = name.chars();
    let valid_head = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_head && valid_tail && name.len() <= 63 {
        Ok(())
    } else {
        Err(AppError::configuration(format!(
            "collection name '{}' is not a valid identifier",
            name
        )))
    }
}

/// 文档集合（一张 JSONB 表）
#[derive(Debug, Clone)]
pub struct DocumentCollection {
    pool: PgPool,
    table: String,
    timeout: Duration,
}

impl DocumentCollection {
    pub fn new(pool: PgPool, table: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let table = table.into();
        validate_identifier(&table)?;
        Ok(Self {
            pool,
            table,
            timeout,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 在超时内执行查询
    async fn bounded<T, F>(&self, operation: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AppError::database(format!("{} failed: {}", operation, e))),
            Err(_) => Err(AppError::timeout(format!(
                "{} exceeded {:?}",
                operation, self.timeout
            ))),
        }
    }

    /// 创建集合表（已存在则跳过）
    pub async fn ensure_table(&self) -> AppResult<()> {
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                name       TEXT PRIMARY KEY,
                document   JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
            self.table
        );

        self.bounded("create collection", sqlx::query(&sql).execute(&self.pool))
            .await?;
        debug!(table = %self.table, "Document collection ready");
        Ok(())
    }

    /// 插入根文档，同名文档已存在时不写入
    ///
    /// 返回是否新建
    pub async fn insert_root_if_absent<D>(&self, name: &str, document: &D) -> AppResult<bool>
    where
        D: Serialize + Sync,
    {
        let sql = format!(
            "INSERT INTO {} (name, document) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING",
            self.table
        );

        let result = self
            .bounded(
                "insert root document",
                sqlx::query(&sql)
                    .bind(name)
                    .bind(Json(document))
                    .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// 同名根文档的数量
    pub async fn count_roots(&self, name: &str) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE name = $1", self.table);

        self.bounded(
            "count root documents",
            sqlx::query_scalar::<_, i64>(&sql)
                .bind(name)
                .fetch_one(&self.pool),
        )
        .await
    }

    /// 追加元素到数组末尾
    ///
    /// 返回根文档是否存在
    pub async fn push<T>(&self, name: &str, field: &str, element: &T) -> AppResult<bool>
    where
        T: Serialize + Sync,
    {
        let sql = format!(
            r#"
            UPDATE {}
            SET document = jsonb_set(
                document,
                ARRAY[$2::text],
                COALESCE(document -> $2::text, '[]'::jsonb) || jsonb_build_array($3::jsonb)
            )
            WHERE name = $1
            "#,
            self.table
        );

        let result = self
            .bounded(
                "push element",
                sqlx::query(&sql)
                    .bind(name)
                    .bind(field)
                    .bind(Json(element))
                    .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// 原位替换第一个 id 匹配的元素
    ///
    /// 返回是否有元素被替换
    pub async fn replace<T>(
        &self,
        name: &str,
        field: &str,
        id: &str,
        element: &T,
    ) -> AppResult<bool>
    where
        T: Serialize + Sync,
    {
        let sql = format!(
            r#"
            UPDATE {}
            SET document = jsonb_set(
                document,
                ARRAY[$2::text, (
                    SELECT (e.pos - 1)::text
                    FROM jsonb_array_elements(document -> $2::text) WITH ORDINALITY AS e(elem, pos)
                    WHERE e.elem ->> 'id' = $3::text
                    ORDER BY e.pos
                    LIMIT 1
                )],
                $4::jsonb,
                false
            )
            WHERE name = $1
              AND EXISTS (
                SELECT 1
                FROM jsonb_array_elements(document -> $2::text) AS x(elem)
                WHERE x.elem ->> 'id' = $3::text
              )
            "#,
            self.table
        );

        let result = self
            .bounded(
                "replace element",
                sqlx::query(&sql)
                    .bind(name)
                    .bind(field)
                    .bind(id)
                    .bind(Json(element))
                    .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// 读取整个数组
    pub async fn fetch_array<T>(&self, name: &str, field: &str) -> AppResult<ArrayFetch<T>>
    where
        T: DeserializeOwned + Send + Unpin + 'static,
    {
        let sql = format!(
            "SELECT document -> $2::text FROM {} WHERE name = $1",
            self.table
        );

        let row = self
            .bounded(
                "fetch array",
                sqlx::query_scalar::<_, Option<Json<Vec<T>>>>(&sql)
                    .bind(name)
                    .bind(field)
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(match row {
            None => ArrayFetch::RootMissing,
            Some(None) => ArrayFetch::FieldMissing,
            Some(Some(Json(elements))) => ArrayFetch::Elements(elements),
        })
    }

    /// 展开数组并取第一个 id 匹配的元素
    pub async fn find_element<T>(&self, name: &str, field: &str, id: &str) -> AppResult<Option<T>>
    where
        T: DeserializeOwned + Send + Unpin + 'static,
    {
        let sql = format!(
            r#"
            SELECT e.elem
            FROM {} AS c
            CROSS JOIN LATERAL jsonb_array_elements(c.document -> $2::text)
                WITH ORDINALITY AS e(elem, pos)
            WHERE c.name = $1 AND e.elem ->> 'id' = $3::text
            ORDER BY e.pos
            LIMIT 1
            "#,
            self.table
        );

        let element = self
            .bounded(
                "find element",
                sqlx::query_scalar::<_, Json<T>>(&sql)
                    .bind(name)
                    .bind(field)
                    .bind(id)
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(element.map(|Json(value)| value))
    }

    /// 展开数组并取所有包含给定 JSON 片段的元素（JSONB `@>`），保持数组顺序
    pub async fn find_containing<T>(
        &self,
        name: &str,
        field: &str,
        pattern: &serde_json::Value,
    ) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned + Send + Unpin + 'static,
    {
        let sql = format!(
            r#"
            SELECT e.elem
            FROM {} AS c
            CROSS JOIN LATERAL jsonb_array_elements(c.document -> $2::text)
                WITH ORDINALITY AS e(elem, pos)
            WHERE c.name = $1 AND e.elem @> $3::jsonb
            ORDER BY e.pos
            "#,
            self.table
        );

        let elements = self
            .bounded(
                "find containing elements",
                sqlx::query_scalar::<_, Json<T>>(&sql)
                    .bind(name)
                    .bind(field)
                    .bind(Json(pattern))
                    .fetch_all(&self.pool),
            )
            .await?;

        Ok(elements.into_iter().map(|Json(value)| value).collect())
    }

    /// 移除所有 id 匹配的元素
    ///
    /// 检查与删除在同一条语句内完成，返回是否有元素被移除
    pub async fn pull(&self, name: &str, field: &str, id: &str) -> AppResult<bool> {
        let sql = format!(
            r#"
            UPDATE {}
            SET document = jsonb_set(
                document,
                ARRAY[$2::text],
                COALESCE((
                    SELECT jsonb_agg(e.elem ORDER BY e.pos)
                    FROM jsonb_array_elements(document -> $2::text) WITH ORDINALITY AS e(elem, pos)
                    WHERE e.elem ->> 'id' IS DISTINCT FROM $3::text
                ), '[]'::jsonb)
            )
            WHERE name = $1
              AND EXISTS (
                SELECT 1
                FROM jsonb_array_elements(document -> $2::text) AS x(elem)
                WHERE x.elem ->> 'id' = $3::text
              )
            "#,
            self.table
        );

        let result = self
            .bounded(
                "pull element",
                sqlx::query(&sql)
                    .bind(name)
                    .bind(field)
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
