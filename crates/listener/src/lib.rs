//! # Relay Listener
//!
//! 监听进程模块。启动时反复尝试与RabbitMQ建立连接，
//! 失败时按平方退避等待，成功后声明事件队列并持有连接。

pub mod connection;
pub mod service;

pub use connection::{backoff_delay, connect_rabbitmq, retry_connect};
pub use service::ListenerService;
