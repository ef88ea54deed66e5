use lapin::{options::QueueDeclareOptions, types::FieldTable, Connection};
use relay_core::config::MessageQueueConfig;
use relay_core::{RelayError, Result};
use tracing::{debug, info};

use crate::connection::connect_rabbitmq;

/// 监听服务
///
/// 持有到RabbitMQ的持久连接。连接建立后声明事件队列；
/// 消息的消费不在本服务职责内。
pub struct ListenerService {
    connection: Connection,
    config: MessageQueueConfig,
}

impl ListenerService {
    /// 建立连接并声明事件队列
    ///
    /// 连接尝试耗尽时返回 `ConnectionExhausted`，对监听进程是致命错误。
    pub async fn start(config: MessageQueueConfig) -> Result<Self> {
        let connection = connect_rabbitmq(&config).await?;
        info!("成功连接到RabbitMQ: {}", config.url);

        let service = Self { connection, config };
        service.declare_event_queue().await?;

        Ok(service)
    }

    /// 声明持久化的事件队列
    async fn declare_event_queue(&self) -> Result<()> {
        let channel = self
            .connection
            .create_channel()
            .await
            .map_err(|e| RelayError::MessageQueue(format!("创建通道失败: {e}")))?;

        channel
            .queue_declare(
                &self.config.event_queue,
                QueueDeclareOptions {
                    durable: true,
                    exclusive: false,
                    auto_delete: false,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| {
                RelayError::MessageQueue(format!(
                    "声明队列 {} 失败: {e}",
                    self.config.event_queue
                ))
            })?;

        debug!("队列 {} 声明成功", self.config.event_queue);
        Ok(())
    }

    /// 获取连接状态
    pub fn is_connected(&self) -> bool {
        self.connection.status().connected()
    }

    /// 关闭连接
    pub async fn close(&self) -> Result<()> {
        self.connection
            .close(200, "正常关闭")
            .await
            .map_err(|e| RelayError::MessageQueue(format!("关闭连接失败: {e}")))?;

        info!("RabbitMQ连接已关闭");
        Ok(())
    }
}
