use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchResult, Product};

/// 报价行: 已接受的匹配 + 用户可编辑的数量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationLine {
    pub original: String,
    pub produto: Product,
    pub quantidade: i64,
    pub subtotal: BigDecimal,
}

impl QuotationLine {
    /// 建行时数量默认为 1
    pub fn new(original: String, produto: Product) -> Self {
        let subtotal = produto.pvenda.clone();
        Self {
            original,
            produto,
            quantidade: 1,
            subtotal,
        }
    }

    /// 写入数量: 向下取整后钳制到 >= 1, 同步重算小计
    pub fn set_quantity(&mut self, quantidade: f64) {
        let q = if quantidade.is_finite() {
            quantidade.floor() as i64
        } else {
            1
        };
        self.quantidade = q.max(1);
        self.recompute();
    }

    /// 替换商品 (用户更正), 数量保持不变
    pub fn replace_product(&mut self, produto: Product) {
        self.produto = produto;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.subtotal = &self.produto.pvenda * BigDecimal::from(self.quantidade);
    }
}

/// 报价单: 一次批量匹配的会话态, 重置时整体销毁
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub lines: Vec<QuotationLine>,
    pub used_fallback: bool,
    pub created_at: DateTime<Utc>,
}

impl Quotation {
    /// 只有命中的结果生成报价行, 未命中查询不进入报价
    pub fn from_results(results: &[MatchResult], used_fallback: bool) -> Self {
        let lines = results
            .iter()
            .filter_map(|r| {
                r.product
                    .clone()
                    .map(|p| QuotationLine::new(r.query.original.clone(), p))
            })
            .collect();
        Self {
            lines,
            used_fallback,
            created_at: Utc::now(),
        }
    }

    /// 总计 = Σ 单价 × 数量, 每次全量重算, 不做增量维护
    pub fn total(&self) -> BigDecimal {
        let mut sum = BigDecimal::from(0);
        for line in &self.lines {
            sum += &line.produto.pvenda * BigDecimal::from(line.quantidade);
        }
        sum.round(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchSource, Query};
    use std::str::FromStr;

    fn product(descricao: &str, pvenda: &str) -> Product {
        Product {
            descricao: descricao.to_string(),
            codauxiliar: "123".to_string(),
            descricao1: None,
            fornecedor: None,
            marca: None,
            pvenda: BigDecimal::from_str(pvenda).unwrap(),
        }
    }

    fn matched(original: &str, pvenda: &str, index: usize) -> MatchResult {
        MatchResult {
            query: Query {
                original: original.to_string(),
                normalized: original.to_lowercase(),
                index,
            },
            product: Some(product(original, pvenda)),
            score: 1.3,
            source: MatchSource::Catalog,
            suggestions: Vec::new(),
        }
    }

    #[test]
    fn line_defaults_to_quantity_one() {
        let line = QuotationLine::new("Dipirona".to_string(), product("Dipirona", "8.90"));
        assert_eq!(line.quantidade, 1);
        assert_eq!(line.subtotal, BigDecimal::from_str("8.90").unwrap());
    }

    #[test]
    fn quantity_is_clamped_on_every_write() {
        let mut line = QuotationLine::new("Dipirona".to_string(), product("Dipirona", "8.90"));
        line.set_quantity(0.0);
        assert_eq!(line.quantidade, 1);
        line.set_quantity(-5.0);
        assert_eq!(line.quantidade, 1);
        line.set_quantity(2.7);
        assert_eq!(line.quantidade, 2);
        assert_eq!(line.subtotal, BigDecimal::from_str("17.80").unwrap());
    }

    #[test]
    fn unmatched_results_never_become_lines() {
        let results = vec![
            matched("Paracetamol 500mg", "10.00", 0),
            MatchResult::unmatched(Query {
                original: "xyz".to_string(),
                normalized: "xyz".to_string(),
                index: 1,
            }),
        ];
        let quotation = Quotation::from_results(&results, false);
        assert_eq!(quotation.lines.len(), 1);
        assert_eq!(quotation.total(), BigDecimal::from_str("10.00").unwrap());
    }

    #[test]
    fn total_is_exact_sum_of_products() {
        let results = vec![
            matched("A", "10.00", 0),
            matched("B", "0.10", 1),
            matched("C", "0.20", 2),
        ];
        let mut quotation = Quotation::from_results(&results, false);
        quotation.lines[1].set_quantity(3.0);
        // 10.00 + 0.30 + 0.20, 两位小数下无漂移
        assert_eq!(quotation.total(), BigDecimal::from_str("10.50").unwrap());
    }

    #[test]
    fn correction_preserves_quantity() {
        let mut line = QuotationLine::new("Dipirona".to_string(), product("Dipirona", "8.90"));
        line.set_quantity(4.0);
        line.replace_product(product("Dipirona Sódica 1g", "12.50"));
        assert_eq!(line.quantidade, 4);
        assert_eq!(line.subtotal, BigDecimal::from_str("50.00").unwrap());
    }
}
