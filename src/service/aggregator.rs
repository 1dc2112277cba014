use bigdecimal::BigDecimal;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::{MatchResult, Product, Quotation, QuotationLine};

/// 报价会话仓库
///
/// 每个会话对应一张报价单; 条目级独占访问 (DashMap 分片锁),
/// 同一报价单的数量/更正写入不会并发交错
#[derive(Debug, Default)]
pub struct QuotationStore {
    sessions: DashMap<String, Quotation>,
    next_id: AtomicU64,
}

impl QuotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从匹配结果建立新会话, 返回 (会话ID, 初始总计)
    pub fn create(&self, results: &[MatchResult], used_fallback: bool) -> (String, BigDecimal) {
        let id = format!("q-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let quotation = Quotation::from_results(results, used_fallback);
        let total = quotation.total();
        self.sessions.insert(id.clone(), quotation);
        (id, total)
    }

    /// 修改某行数量 (写入时钳制), 返回 (更新后的行, 新总计)
    pub fn set_quantity(
        &self,
        session: &str,
        index: usize,
        quantidade: f64,
    ) -> Option<(QuotationLine, BigDecimal)> {
        let mut entry = self.sessions.get_mut(session)?;
        let line = {
            let line = entry.lines.get_mut(index)?;
            line.set_quantity(quantidade);
            line.clone()
        };
        let total = entry.total();
        Some((line, total))
    }

    /// 用户更正某行商品, 数量保留
    pub fn correct_line(
        &self,
        session: &str,
        index: usize,
        produto: Product,
    ) -> Option<(QuotationLine, BigDecimal)> {
        let mut entry = self.sessions.get_mut(session)?;
        let line = {
            let line = entry.lines.get_mut(index)?;
            line.replace_product(produto);
            line.clone()
        };
        let total = entry.total();
        Some((line, total))
    }

    /// 重置会话: 报价行整体销毁
    pub fn reset(&self, session: &str) -> bool {
        self.sessions.remove(session).is_some()
    }

    pub fn get(&self, session: &str) -> Option<Quotation> {
        self.sessions.get(session).map(|q| q.clone())
    }
}

/// 导出报价单 CSV (列与前端下载表一致, 末行为总计)
pub fn export_csv(
    quotation: &Quotation,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "original",
        "produto",
        "fornecedor",
        "marca",
        "preco",
        "quantidade",
        "subtotal",
        "codigo",
    ])?;

    for line in &quotation.lines {
        writer.write_record(&[
            line.original.clone(),
            line.produto.descricao.clone(),
            line.produto.fornecedor.clone().unwrap_or_else(|| "-".to_string()),
            line.produto.marca.clone().unwrap_or_else(|| "-".to_string()),
            line.produto.pvenda.to_string(),
            line.quantidade.to_string(),
            line.subtotal.to_string(),
            line.produto.codauxiliar.clone(),
        ])?;
    }

    let total = quotation.total().to_string();
    writer.write_record(["total", "", "", "", "", "", total.as_str(), ""])?;

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}
