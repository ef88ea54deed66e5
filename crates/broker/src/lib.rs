//! # Relay Broker
//!
//! 消息中继服务模块，基于Axum框架构建。接收入站调度信封，
//! 按 `action` 选择一个下游能力服务，转发对应的子载荷并把
//! 下游的结果翻译成统一响应信封返回给调用方。
//!
//! ## API 端点
//!
//! - `POST /` - 探测端点，确认中继服务可达
//! - `GET /health` - 健康检查
//! - `POST /dispatch` - 调度入口，信封格式见 `relay_core::models`

pub mod clients;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;

use clients::CapabilityClient;
use middleware::{cors_layer, trace_layer};
use relay_core::config::AppConfig;
use relay_core::Result;
use routes::{create_routes, AppState};

/// 创建完整的中继应用
pub fn create_app(config: &AppConfig) -> Result<Router> {
    let client = CapabilityClient::new(&config.broker, config.services.clone())?;

    let state = AppState {
        client: Arc::new(client),
    };

    Ok(create_routes(state).layer(
        ServiceBuilder::new()
            .layer(trace_layer())
            .layer(cors_layer()),
    ))
}
