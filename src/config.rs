use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::dial::Dialer;
use crate::env::ProcessEnvironment;

/// 在搜索路径中查找的 ADB 可执行文件名
pub const ADB_EXECUTABLE_NAME: &str = "adb";

/// ADB 服务器默认监听的端口
pub const ADB_PORT: u16 = 5037;

/// 默认服务器主机
pub const DEFAULT_HOST: &str = "localhost";

/// ADB 服务器连接配置
///
/// 未设置的字段在构造 [`ServerConnection`](crate::ServerConnection) 时补全：
/// 路径从 `PATH` 中查找，主机为 `localhost`，端口为 `5037`。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    /// ADB 可执行文件路径
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// 服务器主机，空字符串表示默认值
    #[serde(default)]
    pub host: String,
    /// 服务器端口，0 表示默认值
    #[serde(default)]
    pub port: u16,
    #[serde(skip)]
    pub dialer: Option<Arc<dyn Dialer>>,
    #[serde(skip)]
    pub environment: Option<Arc<dyn ProcessEnvironment>>,
}

/// ADB 服务器配置构建器
#[derive(Default)]
pub struct ServerConfigBuilder {
    path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    dialer: Option<Arc<dyn Dialer>>,
    environment: Option<Arc<dyn ProcessEnvironment>>,
}

impl ServerConfigBuilder {
    /// 设置 ADB 可执行文件路径
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// 设置服务器主机
    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// 设置服务器端口
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// 替换拨号实现
    pub fn dialer(mut self, dialer: Arc<dyn Dialer>) -> Self {
        self.dialer = Some(dialer);
        self
    }

    /// 替换进程环境实现
    pub fn environment(mut self, environment: Arc<dyn ProcessEnvironment>) -> Self {
        self.environment = Some(environment);
        self
    }

    /// 构建配置
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            path: self.path,
            host: self.host.unwrap_or_default(),
            port: self.port.unwrap_or_default(),
            dialer: self.dialer,
            environment: self.environment,
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}
