use crate::models::CatalogRow;
use sqlx::PgPool;

/// 按描述模糊检索 (排除无价格行)
pub async fn search_by_description(
    pool: &PgPool,
    token: &str,
    limit: i64,
) -> Result<Vec<CatalogRow>, sqlx::Error> {
    sqlx::query_as::<_, CatalogRow>(
        r#"
        SELECT descricao,
               codauxiliar::text AS codauxiliar,
               descricao1,
               fornecedor,
               marca,
               pvenda
        FROM produtos
        WHERE descricao ILIKE $1
          AND pvenda IS NOT NULL
        LIMIT $2
        "#,
    )
    .bind(format!("%{}%", token))
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// 纯数字 token: 辅助编码精确等值, 或描述模糊包含
pub async fn search_by_code_or_description(
    pool: &PgPool,
    token: &str,
    limit: i64,
) -> Result<Vec<CatalogRow>, sqlx::Error> {
    sqlx::query_as::<_, CatalogRow>(
        r#"
        SELECT descricao,
               codauxiliar::text AS codauxiliar,
               descricao1,
               fornecedor,
               marca,
               pvenda
        FROM produtos
        WHERE (codauxiliar::text = $1 OR descricao ILIKE $2)
          AND pvenda IS NOT NULL
        LIMIT $3
        "#,
    )
    .bind(token)
    .bind(format!("%{}%", token))
    .bind(limit)
    .fetch_all(pool)
    .await
}
