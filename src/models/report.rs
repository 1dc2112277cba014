use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::{MatchResult, MatchSource, ScoredCandidate};

/// 未命中时对外展示的占位描述
pub const NOT_FOUND_LABEL: &str = "Produto não encontrado";

/// 金额格式化为巴西货币样式 (R$ 1234,56)
pub fn format_brl(value: &BigDecimal) -> String {
    format!("R$ {}", value.with_scale(2).to_string().replace('.', ","))
}

/// 单条查询的对外报告行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    pub original: String,
    pub produto: String,
    pub fornecedor: String,
    pub marca: String,
    pub preco: BigDecimal,
    pub preco_original: String,
    pub codigo: String,
    pub quantidade: i64,
    pub subtotal: BigDecimal,
    pub source: MatchSource,
    /// 低置信建议, 供外部标注器参考
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sugestoes: Vec<SuggestionReport>,
}

/// 低置信建议的精简投影
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionReport {
    pub descricao: String,
    pub codigo: String,
    pub preco: BigDecimal,
    pub score: f64,
}

impl SuggestionReport {
    fn from_candidate(candidate: &ScoredCandidate) -> Self {
        Self {
            descricao: candidate.product.descricao.clone(),
            codigo: candidate.product.codauxiliar.clone(),
            preco: candidate.product.pvenda.clone(),
            score: candidate.score,
        }
    }
}

impl QueryReport {
    pub fn from_match(result: &MatchResult) -> Self {
        let sugestoes = result
            .suggestions
            .iter()
            .map(SuggestionReport::from_candidate)
            .collect();

        match &result.product {
            Some(p) => Self {
                original: result.query.original.clone(),
                produto: p.descricao.clone(),
                fornecedor: p.fornecedor.clone().unwrap_or_else(|| "-".to_string()),
                marca: p.marca.clone().unwrap_or_else(|| "-".to_string()),
                preco: p.pvenda.clone(),
                preco_original: format_brl(&p.pvenda),
                codigo: p.codauxiliar.clone(),
                quantidade: 1,
                subtotal: p.pvenda.clone(),
                source: result.source,
                sugestoes,
            },
            // 未命中: 价格记 0, 不参与总计
            None => Self {
                original: result.query.original.clone(),
                produto: NOT_FOUND_LABEL.to_string(),
                fornecedor: "-".to_string(),
                marca: "-".to_string(),
                preco: BigDecimal::from(0),
                preco_original: format_brl(&BigDecimal::from(0)),
                codigo: "-".to_string(),
                quantidade: 1,
                subtotal: BigDecimal::from(0),
                source: result.source,
                sugestoes,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, Query};
    use std::str::FromStr;

    #[test]
    fn formats_brl_with_comma() {
        assert_eq!(format_brl(&BigDecimal::from_str("10.5").unwrap()), "R$ 10,50");
        assert_eq!(format_brl(&BigDecimal::from(0)), "R$ 0,00");
    }

    #[test]
    fn unmatched_report_has_zero_price_and_marker() {
        let result = MatchResult::unmatched(Query {
            original: "xyz-nonexistent-987".to_string(),
            normalized: "xyz-nonexistent-987".to_string(),
            index: 0,
        });
        let report = QueryReport::from_match(&result);
        assert_eq!(report.produto, NOT_FOUND_LABEL);
        assert_eq!(report.preco, BigDecimal::from(0));
        assert_eq!(report.subtotal, BigDecimal::from(0));
    }

    #[test]
    fn matched_report_carries_catalog_fields() {
        let result = MatchResult {
            query: Query {
                original: "Paracetamol 500mg".to_string(),
                normalized: "paracetamol 500mg".to_string(),
                index: 0,
            },
            product: Some(Product {
                descricao: "Paracetamol 500mg".to_string(),
                codauxiliar: "123".to_string(),
                descricao1: None,
                fornecedor: Some("Distribuidora ABC".to_string()),
                marca: None,
                pvenda: BigDecimal::from_str("10.00").unwrap(),
            }),
            score: 1.3,
            source: MatchSource::Catalog,
            suggestions: Vec::new(),
        };
        let report = QueryReport::from_match(&result);
        assert_eq!(report.produto, "Paracetamol 500mg");
        assert_eq!(report.fornecedor, "Distribuidora ABC");
        assert_eq!(report.marca, "-");
        assert_eq!(report.quantidade, 1);
        assert_eq!(report.preco_original, "R$ 10,00");
        assert_eq!(report.subtotal, BigDecimal::from_str("10.00").unwrap());
    }
}
