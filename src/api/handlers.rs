use crate::catalog::PgCatalog;
use crate::models::{BatchInput, Product, QueryReport, QuotationLine};
use crate::service::{aggregator, EngineError, MatcherService, QuotationStore};
use axum::{
    extract::{Json, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<MatcherService<PgCatalog>>,
    pub quotations: Arc<QuotationStore>,
}

/// 请求体: 原始文本或字符串数组
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(rename = "productList")]
    pub product_list: BatchInput,
}

/// 批量报价响应
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub session_id: String,
    pub results: Vec<QueryReport>,
    pub total: BigDecimal,
    pub used_fallback: bool,
    pub dropped_queries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// 报价行变更响应 (数量修改/商品更正共用)
#[derive(Debug, Serialize)]
pub struct LineResponse {
    pub line: QuotationLine,
    pub total: BigDecimal,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 批量报价接口
pub async fn quote(State(state): State<AppState>, Json(req): Json<QuoteRequest>) -> Response {
    match state.matcher.process_batch(&req.product_list).await {
        Ok(outcome) => {
            let results: Vec<QueryReport> =
                outcome.results.iter().map(QueryReport::from_match).collect();
            let (session_id, total) =
                state.quotations.create(&outcome.results, outcome.used_fallback);

            // 降级/部分失败以警示文案回告, 不影响结构化结果
            let warning = if outcome.used_fallback {
                Some("Catálogo indisponível; valores simulados".to_string())
            } else if outcome.retrieval_failures > 0 {
                Some(format!(
                    "{} consultas falharam na busca ao catálogo",
                    outcome.retrieval_failures
                ))
            } else {
                None
            };

            let response = QuoteResponse {
                session_id,
                results,
                total,
                used_fallback: outcome.used_fallback,
                dropped_queries: outcome.dropped_queries,
                warning,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e @ EngineError::InvalidInput) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub index: usize,
    pub quantidade: f64,
}

/// 修改报价行数量
pub async fn set_quantity(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(req): Json<QuantityRequest>,
) -> Response {
    match state
        .quotations
        .set_quantity(&session, req.index, req.quantidade)
    {
        Some((line, total)) => (StatusCode::OK, Json(LineResponse { line, total })).into_response(),
        None => line_not_found(&session, req.index),
    }
}

#[derive(Debug, Deserialize)]
pub struct CorrectionRequest {
    pub index: usize,
    pub produto: Product,
}

/// 更正报价行商品 (数量保留)
pub async fn correct_line(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(req): Json<CorrectionRequest>,
) -> Response {
    match state
        .quotations
        .correct_line(&session, req.index, req.produto)
    {
        Some((line, total)) => (StatusCode::OK, Json(LineResponse { line, total })).into_response(),
        None => line_not_found(&session, req.index),
    }
}

/// 重置报价会话
pub async fn reset_quotation(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Response {
    if state.quotations.reset(&session) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("quotation {} not found", session),
            }),
        )
            .into_response()
    }
}

/// 导出报价单 CSV
pub async fn export_quotation(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Response {
    let Some(quotation) = state.quotations.get(&session) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("quotation {} not found", session),
            }),
        )
            .into_response();
    };

    match aggregator::export_csv(&quotation) {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

fn line_not_found(session: &str, index: usize) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("quotation {} line {} not found", session, index),
        }),
    )
        .into_response()
}
