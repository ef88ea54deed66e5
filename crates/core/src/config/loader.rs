use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::env;

/// 配置加载器，提供便捷的配置加载方法
pub struct ConfigLoader;

impl ConfigLoader {
    /// 根据环境加载配置
    ///
    /// 优先级：
    /// 1. 环境变量 RELAY_CONFIG_PATH 指定的配置文件
    /// 2. 环境变量 RELAY_ENV 指定的环境配置文件
    /// 3. 默认配置文件
    pub fn load() -> Result<AppConfig> {
        // 检查是否指定了配置文件路径
        if let Ok(config_path) = env::var("RELAY_CONFIG_PATH") {
            return AppConfig::load(Some(&config_path))
                .with_context(|| format!("加载指定配置文件失败: {config_path}"));
        }

        // 检查环境变量
        let env_name = env::var("RELAY_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{env_name}.toml");

        // 尝试加载环境特定的配置文件
        if std::path::Path::new(&config_file).exists() {
            AppConfig::load(Some(&config_file))
                .with_context(|| format!("加载环境配置文件失败: {config_file}"))
        } else {
            // 回退到默认配置
            AppConfig::load(None).context("加载默认配置失败")
        }
    }

    /// 获取消息队列连接字符串，支持环境变量覆盖
    pub fn get_message_queue_url(config: &AppConfig) -> String {
        env::var("RABBITMQ_URL")
            .or_else(|_| env::var("AMQP_URL"))
            .unwrap_or_else(|_| config.message_queue.url.clone())
    }

    /// 获取当前环境名称
    pub fn current_env() -> String {
        env::var("RELAY_ENV").unwrap_or_else(|_| "development".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_message_queue_url_falls_back_to_config() {
        // 测试进程内不设置覆盖变量时使用配置值
        if env::var("RABBITMQ_URL").is_err() && env::var("AMQP_URL").is_err() {
            let config = AppConfig::default();
            assert_eq!(
                ConfigLoader::get_message_queue_url(&config),
                config.message_queue.url
            );
        }
    }

    #[test]
    fn test_current_env_defaults_to_development() {
        if env::var("RELAY_ENV").is_err() {
            assert_eq!(ConfigLoader::current_env(), "development");
        }
    }
}
