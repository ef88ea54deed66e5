use axum::response::IntoResponse;
use relay_core::models::ServiceResponse;

use crate::response;

/// 探测端点，不做任何调度
pub async fn broker_ping() -> impl IntoResponse {
    response::ok(ServiceResponse::ok("到达消息中继服务"))
}
