use serde::{Deserialize, Serialize};

use super::{Product, Query};

/// 匹配来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Catalog,
    Fallback,
    Unmatched,
}

/// 打分后的候选 (每个查询临时产生, 选型完即丢弃)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub product: Product,
    pub score: f64,
}

/// 单条查询的匹配结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub query: Query,
    /// None = 未找到, 属正常终态而非错误
    pub product: Option<Product>,
    pub score: f64,
    pub source: MatchSource,
    /// 低置信候选, 仅暴露给外部标注器参考, 不参与报价
    pub suggestions: Vec<ScoredCandidate>,
}

impl MatchResult {
    /// 未命中结果 (下游渲染为 "产品未找到")
    pub fn unmatched(query: Query) -> Self {
        Self {
            query,
            product: None,
            score: 0.0,
            source: MatchSource::Unmatched,
            suggestions: Vec::new(),
        }
    }
}

/// 一次批量匹配的完整产出
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// 与输入同序, 每条查询恰好一条结果
    pub results: Vec<MatchResult>,
    /// 整批走了合成数据 (目录不可达)
    pub used_fallback: bool,
    /// 超出准入上限被丢弃的查询条数
    pub dropped_queries: usize,
    /// 检索失败的查询条数
    pub retrieval_failures: usize,
}
