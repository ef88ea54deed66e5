use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RelayError;

/// 下游能力服务的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Auth,
    Logger,
    Mailer,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Auth => "auth",
            Capability::Logger => "logger",
            Capability::Mailer => "mailer",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 认证能力的子载荷
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub email: String,
    pub password: String,
}

/// 日志能力的子载荷
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPayload {
    pub name: String,
    pub data: String,
}

/// 邮件能力的子载荷
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailPayload {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub message: String,
}

/// 入站调度信封
///
/// 只有与 `action` 匹配的子载荷有意义，其余字段即使出现也会被忽略。
/// 子载荷缺失时按零值处理，字段内容由下游服务自行校验。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub action: String,
    #[serde(default)]
    pub auth: AuthPayload,
    #[serde(default)]
    pub logger: LogPayload,
    #[serde(default)]
    pub mailer: MailPayload,
}

/// 已解析的调度动作，每个变体携带自己的强类型子载荷
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchAction {
    Auth(AuthPayload),
    Logger(LogPayload),
    Mailer(MailPayload),
}

impl DispatchAction {
    pub fn capability(&self) -> Capability {
        match self {
            DispatchAction::Auth(_) => Capability::Auth,
            DispatchAction::Logger(_) => Capability::Logger,
            DispatchAction::Mailer(_) => Capability::Mailer,
        }
    }
}

impl TryFrom<DispatchRequest> for DispatchAction {
    type Error = RelayError;

    /// 在边界处将原始 action 字符串解析为封闭的动作集合，
    /// 无法识别的 action 在这里失败，不会发起任何下游调用
    fn try_from(request: DispatchRequest) -> Result<Self, Self::Error> {
        match request.action.as_str() {
            "auth" => Ok(DispatchAction::Auth(request.auth)),
            "logger" => Ok(DispatchAction::Logger(request.logger)),
            "mailer" => Ok(DispatchAction::Mailer(request.mailer)),
            other => Err(RelayError::UnknownAction {
                action: other.to_string(),
            }),
        }
    }
}

/// 统一响应信封
///
/// 不变量: `error=false` 对应返回给调用方的接受状态码(202)，
/// `error=true` 对应 4xx/5xx 且 `data` 缺失。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ServiceResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn ok_with_data(message: impl Into<String>, data: Value) -> Self {
        Self {
            error: false,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: None,
        }
    }
}
