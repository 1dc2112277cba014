use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

/// 匹配引擎参数
/// 阈值/加成不内嵌在算法里, 测试可以整组替换
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// 置信匹配阈值, score >= 此值才可入选
    pub similarity_threshold: f64,
    /// 完全相等加成
    pub exact_match_bonus: f64,
    /// 包含关系加成
    pub component_match_bonus: f64,
    /// 低置信噪声下限, score 高于此值才保留为建议
    pub suggestion_floor: f64,
    /// 单批查询条数上限 (准入控制, 超出部分丢弃)
    pub max_queries: usize,
    /// 每个查询向目录请求的候选条数上限
    pub candidate_limit: i64,
    /// 每条结果附带的低置信建议条数上限
    pub max_suggestions: usize,
    /// 检索并发度 (结果仍按输入顺序返回)
    pub parallelism: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.1,
            exact_match_bonus: 0.3,
            component_match_bonus: 0.2,
            suggestion_floor: 0.05,
            max_queries: 100,
            candidate_limit: 50,
            max_suggestions: 10,
            parallelism: 4,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgres://localhost/pharma_quote".to_string()),
            },
            matching: MatchingConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgres://localhost/pharma_quote".to_string()),
            },
            matching: MatchingConfig {
                similarity_threshold: std::env::var("SIMILARITY_THRESHOLD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0.1),
                max_queries: std::env::var("MAX_QUERIES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(100),
                parallelism: std::env::var("RETRIEVAL_PARALLELISM")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(4),
                ..MatchingConfig::default()
            },
        }
    }
}
