use anyhow::{Context, Result};
use relay_core::config::{AppConfig, ConfigLoader};
use relay_listener::ListenerService;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

/// 应用运行模式
#[derive(Debug, Clone)]
pub enum AppMode {
    /// 仅运行中继服务
    Broker,
    /// 仅运行监听进程
    Listener,
    /// 运行所有组件
    All,
}

/// 主应用程序
pub struct Application {
    config: AppConfig,
    mode: AppMode,
}

impl Application {
    pub fn new(config: AppConfig, mode: AppMode) -> Self {
        info!("初始化应用程序，模式: {:?}", mode);
        Self { config, mode }
    }

    pub async fn run(self) -> Result<()> {
        match &self.mode {
            AppMode::Broker => self.run_broker().await,
            AppMode::Listener => self.run_listener().await,
            AppMode::All => {
                tokio::try_join!(self.run_broker(), self.run_listener())?;
                Ok(())
            }
        }
    }

    /// 启动中继服务并阻塞到收到关闭信号
    async fn run_broker(&self) -> Result<()> {
        let app = relay_broker::create_app(&self.config).context("创建中继应用失败")?;

        let listener = TcpListener::bind(&self.config.broker.bind_address)
            .await
            .with_context(|| format!("绑定地址失败: {}", self.config.broker.bind_address))?;

        info!("中继服务监听于 {}", self.config.broker.bind_address);

        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for_shutdown_signal())
            .await
            .context("中继服务运行失败")?;

        info!("中继服务已停止");
        Ok(())
    }

    /// 建立消息队列连接并持有到收到关闭信号
    async fn run_listener(&self) -> Result<()> {
        let mut mq_config = self.config.message_queue.clone();
        mq_config.url = ConfigLoader::get_message_queue_url(&self.config);

        let service = match ListenerService::start(mq_config).await {
            Ok(service) => service,
            Err(e) => {
                error!("监听进程启动失败: {e}");
                return Err(e).context("监听进程启动失败");
            }
        };

        wait_for_shutdown_signal().await;

        service.close().await.context("关闭消息队列连接失败")?;
        info!("监听进程已停止");
        Ok(())
    }
}

/// 等待关闭信号
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("安装Ctrl+C信号处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("安装SIGTERM信号处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到关闭信号，开始优雅关闭...");
}
