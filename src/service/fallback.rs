use bigdecimal::BigDecimal;
use rand::Rng;

use crate::models::{MatchResult, MatchSource, Product, Query};

/// 降级数据的固定枚举
const SUPPLIERS: [&str; 4] = [
    "Distribuidora ABC",
    "Farmácia XYZ",
    "Drogaria Central",
    "Fornecedor Médico",
];
const BRANDS: [&str; 5] = ["Genérico", "MedPharma", "FarmaPlus", "BioSaúde", "NaturaMed"];

/// 目录不可达时为整批查询合成结果
///
/// 形状是确定的 (字段/取值范围/枚举), 内容随机;
/// 随机源由调用方注入, 测试用种子即可复现
pub fn generate_fallback(rng: &mut impl Rng, queries: &[Query]) -> Vec<MatchResult> {
    queries
        .iter()
        .map(|query| {
            // 以分为单位生成, 保证两位小数且均匀落在 [5, 100]
            let cents: i64 = rng.gen_range(500..=10_000);
            let pvenda = BigDecimal::new(cents.into(), 2);
            let codigo = format!("P{:04}", rng.gen_range(0..10_000));
            let fornecedor = SUPPLIERS[rng.gen_range(0..SUPPLIERS.len())];
            let marca = BRANDS[rng.gen_range(0..BRANDS.len())];

            MatchResult {
                query: query.clone(),
                product: Some(Product {
                    descricao: query.original.clone(),
                    codauxiliar: codigo,
                    descricao1: None,
                    fornecedor: Some(fornecedor.to_string()),
                    marca: Some(marca.to_string()),
                    pvenda,
                }),
                score: 0.0,
                source: MatchSource::Fallback,
                suggestions: Vec::new(),
            }
        })
        .collect()
}
