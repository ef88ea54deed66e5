use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use relay_core::models::{DispatchAction, DispatchRequest};
use relay_core::RelayError;
use tracing::info;

use crate::error::ApiResult;
use crate::response;
use crate::routes::AppState;

/// 调度入口
///
/// 按信封里的 action 选择一个能力服务，每个请求恰好发起一次
/// 下游调用；action 无法识别或请求体不合法时不发起任何调用。
pub async fn dispatch(
    State(state): State<AppState>,
    payload: Result<Json<DispatchRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) =
        payload.map_err(|rejection| RelayError::MalformedInput(rejection.body_text()))?;

    let action = DispatchAction::try_from(request)?;
    info!("分发请求: action={}", action.capability());

    let envelope = match action {
        DispatchAction::Auth(payload) => state.client.authenticate(&payload).await?,
        DispatchAction::Logger(payload) => state.client.send_log(&payload).await?,
        DispatchAction::Mailer(payload) => state.client.send_mail(&payload).await?,
    };

    Ok(response::accepted(envelope))
}
