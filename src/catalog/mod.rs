pub mod pool;
pub mod queries;

pub use pool::create_pool;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::Product;

/// 目录检索失败 (触发单条上报或整批降级, 从不中断进程)
#[derive(Debug, Clone, Error)]
#[error("catalog retrieval failed: {0}")]
pub struct RetrievalError(pub String);

impl From<sqlx::Error> for RetrievalError {
    fn from(e: sqlx::Error) -> Self {
        RetrievalError(e.to_string())
    }
}

/// 候选检索能力
/// 按种子 token 返回有限数量的目录候选; 实现方负责排除无价格的行
#[async_trait]
pub trait CandidateRetriever: Send + Sync {
    async fn fetch_candidates(&self, token: &str, limit: i64)
        -> Result<Vec<Product>, RetrievalError>;
}

/// Postgres 商品目录
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateRetriever for PgCatalog {
    async fn fetch_candidates(
        &self,
        token: &str,
        limit: i64,
    ) -> Result<Vec<Product>, RetrievalError> {
        // 纯数字 token 额外尝试辅助编码精确等值
        let rows = if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            queries::search_by_code_or_description(&self.pool, token, limit).await?
        } else {
            queries::search_by_description(&self.pool, token, limit).await?
        };

        // 逐行校验, 畸形行跳过而不是中断整个查询
        let mut products = Vec::with_capacity(rows.len());
        for row in rows {
            match row.into_product() {
                Some(p) => products.push(p),
                None => tracing::debug!("Skipping malformed catalog row for token {}", token),
            }
        }
        Ok(products)
    }
}
