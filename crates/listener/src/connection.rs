use std::future::Future;
use std::time::Duration;

use lapin::{Connection, ConnectionProperties};
use relay_core::config::MessageQueueConfig;
use relay_core::{RelayError, Result};
use tokio::time::sleep;
use tracing::{info, warn};

/// 第 attempt 次失败后的退避延迟
///
/// 秒数为已失败次数的平方。名义上叫退避，实际增长是平方而非指数，
/// 前两次延迟为 0 秒和 1 秒。
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(u64::from(attempt) * u64::from(attempt))
}

/// 反复尝试建立连接直到成功或失败次数超过上限
///
/// `ceiling` 是允许失败的次数，达到后下一次失败即放弃，
/// 返回 `ConnectionExhausted`。每次失败的句柄在重试前丢弃。
pub async fn retry_connect<T, E, F, Fut>(ceiling: u32, mut connect: F) -> Result<T>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let mut attempt: u32 = 0;

    loop {
        match connect().await {
            Ok(connection) => {
                if attempt > 0 {
                    info!("第 {} 次尝试连接成功", attempt + 1);
                }
                return Ok(connection);
            }
            Err(e) if attempt >= ceiling => {
                warn!("连接失败: {e}");
                return Err(RelayError::ConnectionExhausted {
                    attempts: attempt + 1,
                });
            }
            Err(e) => {
                warn!("消息队列尚未就绪: {e}");
                let delay = backoff_delay(attempt);
                info!("退避 {} 秒后重试", delay.as_secs());
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// 通过重试策略连接RabbitMQ
pub async fn connect_rabbitmq(config: &MessageQueueConfig) -> Result<Connection> {
    let url = config.url.as_str();
    let timeout = Duration::from_secs(config.connection_timeout_seconds);

    retry_connect(config.connect_attempt_ceiling, move || async move {
        match tokio::time::timeout(
            timeout,
            Connection::connect(url, ConnectionProperties::default()),
        )
        .await
        {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(_) => Err(format!("连接超时({}秒)", timeout.as_secs())),
        }
    })
    .await
}
