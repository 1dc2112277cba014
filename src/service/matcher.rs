use futures::stream::{self, StreamExt};
use indexmap::IndexSet;
use rand::thread_rng;
use thiserror::Error;

use crate::catalog::{CandidateRetriever, RetrievalError};
use crate::config::MatchingConfig;
use crate::models::{BatchInput, BatchOutcome, MatchResult, Product, Query};

use super::{fallback, normalizer, selector};

/// 批量处理在进入流水线前就被拒绝的情形
#[derive(Debug, Error)]
pub enum EngineError {
    /// 空批次: 不做任何部分处理
    #[error("no valid product names in input")]
    InvalidInput,
}

/// 匹配服务: 规整 -> 检索 -> 打分选型 -> 汇总
pub struct MatcherService<R> {
    retriever: R,
    config: MatchingConfig,
}

impl<R: CandidateRetriever> MatcherService<R> {
    pub fn new(retriever: R, config: MatchingConfig) -> Self {
        Self { retriever, config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// 批量匹配入口
    pub async fn process_batch(&self, input: &BatchInput) -> Result<BatchOutcome, EngineError> {
        // 1. 拆分 + 准入控制 (先于任何检索调用)
        let split = normalizer::split_batch(input, self.config.max_queries);
        if split.queries.is_empty() {
            return Err(EngineError::InvalidInput);
        }
        if split.dropped > 0 {
            tracing::warn!("Batch over admission cap, dropped {} queries", split.dropped);
        }

        let total = split.queries.len();
        tracing::info!("处理批量查询: {} 条", total);

        // 2. 有界并发检索, 结果保持输入顺序; 单条失败不影响其余查询
        let settled: Vec<Result<MatchResult, RetrievalError>> =
            stream::iter(split.queries.iter().map(|q| self.match_one(q)))
                .buffered(self.config.parallelism.max(1))
                .collect()
                .await;

        // 3. 整批检索失败 => 整批降级为合成数据
        let failures = settled.iter().filter(|r| r.is_err()).count();
        if failures == total {
            tracing::warn!("Catalog unreachable for the whole batch, generating fallback data");
            let results = fallback::generate_fallback(&mut thread_rng(), &split.queries);
            return Ok(BatchOutcome {
                results,
                used_fallback: true,
                dropped_queries: split.dropped,
                retrieval_failures: failures,
            });
        }

        // 4. 个别失败只降级该条: 记为未命中
        let results: Vec<MatchResult> = split
            .queries
            .iter()
            .zip(settled)
            .map(|(query, res)| match res {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!("Retrieval failed for '{}': {}", query.original, e);
                    MatchResult::unmatched(query.clone())
                }
            })
            .collect();

        let matched = results.iter().filter(|r| r.product.is_some()).count();
        tracing::info!(
            "匹配完成: 命中 {}/{}, 检索失败 {} 条",
            matched, total, failures
        );

        Ok(BatchOutcome {
            results,
            used_fallback: false,
            dropped_queries: split.dropped,
            retrieval_failures: failures,
        })
    }

    /// 单条查询: 以规整后的首词为种子检索候选, 去重后选型
    async fn match_one(&self, query: &Query) -> Result<MatchResult, RetrievalError> {
        let Some(token) = query.normalized.split_whitespace().next() else {
            // 规整后无词可用, 无从检索
            return Ok(MatchResult::unmatched(query.clone()));
        };

        let raw_candidates = self
            .retriever
            .fetch_candidates(token, self.config.candidate_limit)
            .await?;

        // 候选按编码去重 (保序, 先到先得)
        let mut seen: IndexSet<String> = IndexSet::new();
        let mut candidates: Vec<Product> = Vec::with_capacity(raw_candidates.len());
        for product in raw_candidates {
            if product.codauxiliar.is_empty() || seen.insert(product.codauxiliar.clone()) {
                candidates.push(product);
            }
        }

        tracing::debug!(
            "Query '{}' token '{}': {} candidates",
            query.original, token, candidates.len()
        );

        Ok(selector::select(&self.config, query, &candidates))
    }
}
