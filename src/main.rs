use axum::{
    routing::{delete, get, post},
    Router,
};
use pharma_quote_rust::api::AppState;
use pharma_quote_rust::{api, create_pool, AppConfig, MatcherService, PgCatalog, QuotationStore};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    // 创建数据库连接池
    let pool = create_pool(&config.database.url).await?;
    info!("Database pool created");

    // 组装匹配服务与报价会话仓库
    let state = AppState {
        matcher: Arc::new(MatcherService::new(
            PgCatalog::new(pool),
            config.matching.clone(),
        )),
        quotations: Arc::new(QuotationStore::new()),
    };

    // 构建路由
    let app = Router::new()
        .route("/health", get(api::health_check))
        .route("/api/quote", post(api::quote))
        .route("/api/quotation/:session/quantity", post(api::set_quantity))
        .route("/api/quotation/:session/correction", post(api::correct_line))
        .route("/api/quotation/:session/csv", get(api::export_quotation))
        .route("/api/quotation/:session", delete(api::reset_quotation))
        .layer(ServiceBuilder::new())
        .with_state(state);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST   /api/quote                        - 批量报价匹配");
    info!("  POST   /api/quotation/:id/quantity       - 修改行数量");
    info!("  POST   /api/quotation/:id/correction     - 更正行商品");
    info!("  GET    /api/quotation/:id/csv            - 导出 CSV");
    info!("  DELETE /api/quotation/:id                - 重置报价");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
