use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_core::models::ServiceResponse;
use relay_core::RelayError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("中继错误: {0}")]
    Relay(#[from] RelayError),

    #[error("内部服务器错误: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    /// 所有错误在离开系统前都转换为统一响应信封，
    /// 只携带分类内的固定消息，不透出内部错误细节
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Relay(RelayError::MalformedInput(detail)) => (
                StatusCode::BAD_REQUEST,
                format!("请求体格式错误: {detail}"),
            ),
            ApiError::Relay(RelayError::UnknownAction { action }) => (
                StatusCode::BAD_REQUEST,
                format!("未知的操作类型: {action}"),
            ),
            ApiError::Relay(RelayError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "无效的凭证".to_string())
            }
            ApiError::Relay(RelayError::DownstreamCallFailed { capability }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("调用 {capability} 服务失败"),
            ),
            ApiError::Relay(RelayError::Network(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "下游服务暂时不可用".to_string(),
            ),
            ApiError::Relay(_) | ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "系统内部错误".to_string(),
            ),
        };

        let body = Json(ServiceResponse::failure(message));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
