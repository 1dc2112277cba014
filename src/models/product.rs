use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 目录商品 (produtos 表, 保留遗留列名)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub descricao: String,           // 商品描述
    pub codauxiliar: String,         // EAN/辅助编码
    pub descricao1: Option<String>,  // 剂型 (片剂/糖浆等)
    pub fornecedor: Option<String>,  // 供应商
    pub marca: Option<String>,       // 品牌
    pub pvenda: BigDecimal,          // 销售单价
}

/// 目录原始行 (校验前, 任何字段都可能缺失)
#[derive(Debug, Clone, FromRow)]
pub struct CatalogRow {
    pub descricao: Option<String>,
    pub codauxiliar: Option<String>,
    pub descricao1: Option<String>,
    pub fornecedor: Option<String>,
    pub marca: Option<String>,
    pub pvenda: Option<BigDecimal>,
}

impl CatalogRow {
    /// 边界校验: 缺描述或缺价格的行直接丢弃, 不进入引擎
    pub fn into_product(self) -> Option<Product> {
        let descricao = self.descricao.filter(|d| !d.trim().is_empty())?;
        let pvenda = self.pvenda?;
        Some(Product {
            descricao,
            codauxiliar: self.codauxiliar.unwrap_or_default(),
            descricao1: self.descricao1,
            fornecedor: self.fornecedor,
            marca: self.marca,
            pvenda,
        })
    }
}
