use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::clients::CapabilityClient;
use crate::handlers::{dispatch::dispatch, health::health_check, root::broker_ping};

/// 中继应用状态
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<CapabilityClient>,
}

/// 创建中继路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // 探测端点
        .route("/", post(broker_ping))
        // 健康检查
        .route("/health", get(health_check))
        // 调度入口
        .route("/dispatch", post(dispatch))
        .with_state(state)
}
