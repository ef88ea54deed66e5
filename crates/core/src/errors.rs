use thiserror::Error;

use crate::models::Capability;

/// 系统统一错误类型
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("请求体格式错误: {0}")]
    MalformedInput(String),
    #[error("未知的操作类型: {action}")]
    UnknownAction { action: String },
    #[error("无效的凭证")]
    InvalidCredentials,
    #[error("调用 {capability} 服务失败")]
    DownstreamCallFailed { capability: Capability },
    #[error("网络错误: {0}")]
    Network(String),
    #[error("连接消息队列失败: 已尝试 {attempts} 次")]
    ConnectionExhausted { attempts: u32 },
    #[error("消息队列错误: {0}")]
    MessageQueue(String),
    #[error("序列化错误: {0}")]
    Serialization(String),
    #[error("配置错误: {0}")]
    Configuration(String),
    #[error("内部错误: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, RelayError>;

impl RelayError {
    /// 错误是否由调用方的输入引起
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RelayError::MalformedInput(_)
                | RelayError::UnknownAction { .. }
                | RelayError::InvalidCredentials
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = RelayError::UnknownAction {
            action: "ping".to_string(),
        };
        assert_eq!(err.to_string(), "未知的操作类型: ping");

        let err = RelayError::InvalidCredentials;
        assert_eq!(err.to_string(), "无效的凭证");

        let err = RelayError::DownstreamCallFailed {
            capability: Capability::Mailer,
        };
        assert_eq!(err.to_string(), "调用 mailer 服务失败");

        let err = RelayError::ConnectionExhausted { attempts: 6 };
        assert_eq!(err.to_string(), "连接消息队列失败: 已尝试 6 次");
    }

    #[test]
    fn test_is_client_error() {
        assert!(RelayError::MalformedInput("bad json".to_string()).is_client_error());
        assert!(RelayError::UnknownAction {
            action: "x".to_string()
        }
        .is_client_error());
        assert!(RelayError::InvalidCredentials.is_client_error());

        assert!(!RelayError::Network("timeout".to_string()).is_client_error());
        assert!(!RelayError::DownstreamCallFailed {
            capability: Capability::Auth
        }
        .is_client_error());
        assert!(!RelayError::Internal("oops".to_string()).is_client_error());
    }
}
