use axum::{http::StatusCode, response::IntoResponse, Json};
use relay_core::models::ServiceResponse;

pub fn ok(body: ServiceResponse) -> impl IntoResponse {
    (StatusCode::OK, Json(body))
}

/// 调度成功时统一使用接受状态码，下游的信封原样转发
pub fn accepted(body: ServiceResponse) -> impl IntoResponse {
    (StatusCode::ACCEPTED, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_uses_200() {
        let response = ok(ServiceResponse::ok("到达中继服务")).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_accepted_uses_202() {
        let response = accepted(ServiceResponse::ok("已登录")).into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
}
