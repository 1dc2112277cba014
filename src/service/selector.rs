use crate::config::MatchingConfig;
use crate::models::{MatchResult, MatchSource, Product, Query, ScoredCandidate};

use super::scorer;

/// 从候选集中选出至多一个置信匹配
///
/// 置信分区: score >= similarity_threshold
/// 低置信分区: suggestion_floor < score < similarity_threshold (保留为建议)
/// 平分时目录顺序在前者胜出 (稳定排序, 先到先得)
pub fn select(config: &MatchingConfig, query: &Query, candidates: &[Product]) -> MatchResult {
    let mut confident: Vec<ScoredCandidate> = Vec::new();
    let mut low_confidence: Vec<ScoredCandidate> = Vec::new();

    for product in candidates {
        let score = scorer::similarity(config, &query.normalized, &product.descricao);
        if score >= config.similarity_threshold {
            confident.push(ScoredCandidate {
                product: product.clone(),
                score,
            });
        } else if score > config.suggestion_floor {
            low_confidence.push(ScoredCandidate {
                product: product.clone(),
                score,
            });
        }
    }

    confident.sort_by(|x, y| y.score.total_cmp(&x.score));
    low_confidence.sort_by(|x, y| y.score.total_cmp(&x.score));
    low_confidence.truncate(config.max_suggestions);

    match confident.into_iter().next() {
        Some(best) => MatchResult {
            query: query.clone(),
            score: best.score,
            product: Some(best.product),
            source: MatchSource::Catalog,
            suggestions: low_confidence,
        },
        None => MatchResult {
            query: query.clone(),
            product: None,
            score: 0.0,
            source: MatchSource::Unmatched,
            suggestions: low_confidence,
        },
    }
}
