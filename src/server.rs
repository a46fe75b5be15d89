use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{ServerConfig, ADB_EXECUTABLE_NAME, ADB_PORT, DEFAULT_HOST};
use crate::dial::{Connection, Dialer, TcpDialer};
use crate::env::{LocalEnvironment, ProcessEnvironment};
use crate::error::{ADBError, ADBResult};

/// 能启动 ADB 服务器并与之建立连接的对象
pub trait AdbServer: Send + Sync {
    /// 确保服务器正在运行
    fn start(&self) -> ADBResult<()>;

    /// 以 root 身份重启设备端的 adbd
    fn become_root(&self) -> ADBResult<()>;

    /// 安装 APK
    fn install_package(&self, apk_path: &str) -> ADBResult<()>;

    /// 连接服务器，必要时先启动它
    fn dial(&self) -> ADBResult<Box<dyn Connection>>;
}

/// 本地 ADB 服务器的连接管理
///
/// 内部没有锁：并发调用 [`dial`](Self::dial) 可能同时触发多次服务器启动，需要调用方自行串行化。
#[derive(Debug, Clone)]
pub struct ServerConnection {
    adb_path: PathBuf,
    host: String,
    port: u16,
    dialer: Arc<dyn Dialer>,
    environment: Arc<dyn ProcessEnvironment>,
    // host:port，构造时计算一次
    address: String,
}

impl ServerConnection {
    /// 补全配置缺省值并校验 ADB 可执行文件
    pub fn new(config: ServerConfig) -> ADBResult<Self> {
        let dialer = config.dialer.unwrap_or_else(|| Arc::new(TcpDialer));

        let host = if config.host.is_empty() {
            DEFAULT_HOST.to_string()
        } else {
            config.host
        };
        let port = if config.port == 0 { ADB_PORT } else { config.port };

        let environment = config
            .environment
            .unwrap_or_else(|| Arc::new(LocalEnvironment));

        let adb_path = match config.path {
            Some(path) => path,
            None => environment.look_path(ADB_EXECUTABLE_NAME).map_err(|e| {
                ADBError::wrap(e, format!("could not find {} in PATH", ADB_EXECUTABLE_NAME))
            })?,
        };

        environment.is_executable_file(&adb_path).map_err(|e| {
            ADBError::wrap(e, format!("invalid adb executable: {}", adb_path.display()))
        })?;

        let address = format!("{}:{}", host, port);
        debug!("使用 ADB {} 连接服务器 {}", adb_path.display(), address);

        Ok(Self {
            adb_path,
            host,
            port,
            dialer,
            environment,
            address,
        })
    }

    /// 使用默认配置创建
    pub fn local() -> ADBResult<Self> {
        Self::new(ServerConfig::default())
    }

    /// 服务器地址 `host:port`
    pub fn address(&self) -> &str {
        &self.address
    }

    /// 已校验的 ADB 可执行文件路径
    pub fn adb_path(&self) -> &Path {
        &self.adb_path
    }

    /// 服务器主机
    pub fn host(&self) -> &str {
        &self.host
    }

    /// 服务器端口
    pub fn port(&self) -> u16 {
        self.port
    }

    /// 连接服务器
    ///
    /// 首次连接失败时尝试启动服务器，然后只再连接一次，第二次的结果原样返回。
    /// 启动失败时直接返回启动错误，不再进行第二次连接。
    pub fn dial(&self) -> ADBResult<Box<dyn Connection>> {
        match self.dialer.dial(&self.address) {
            Ok(conn) => Ok(conn),
            Err(e) => {
                warn!("连接 ADB 服务器 {} 失败，尝试启动服务器: {}", self.address, e);

                self.start()
                    .map_err(|e| ADBError::wrap(e, "error starting server for dial"))?;

                self.dialer.dial(&self.address)
            }
        }
    }

    /// 启动服务器
    ///
    /// 先尝试 `adb tcp:<address> start-server`，失败后回退到 `adb start-server`。
    pub fn start(&self) -> ADBResult<()> {
        let target = format!("tcp:{}", self.address);
        let mut result = self
            .environment
            .combined_output(&self.adb_path, &[target.as_str(), "start-server"]);

        if let Err(e) = &result.status {
            debug!("{} start-server 失败 ({})，改用 start-server", target, e);
            result = self
                .environment
                .combined_output(&self.adb_path, &["start-server"]);
        }

        let output = result.text();
        match result.status {
            Ok(()) => {
                info!("ADB 服务器已就绪: {}", self.address);
                Ok(())
            }
            Err(e) => {
                let message = format!("error starting server: {}\noutput:\n{}", e, output);
                Err(ADBError::wrap(e, message))
            }
        }
    }

    /// 执行 `adb root`
    pub fn become_root(&self) -> ADBResult<()> {
        self.run_once(&["root"], "error restarting adbd as root")
    }

    /// 执行 `adb -e install <apk_path>`
    pub fn install_package(&self, apk_path: &str) -> ADBResult<()> {
        self.run_once(&["-e", "install", apk_path], "error installing package")
    }

    fn run_once(&self, args: &[&str], context: &str) -> ADBResult<()> {
        debug!("执行 ADB 命令: {:?}", args);
        let result = self.environment.combined_output(&self.adb_path, args);
        let output = result.text();

        match result.status {
            Ok(()) => {
                info!("ADB 命令执行成功: {:?}", args);
                Ok(())
            }
            Err(e) => {
                let message = format!("{}: {}\noutput:\n{}", context, e, output);
                Err(ADBError::wrap(e, message))
            }
        }
    }
}

impl AdbServer for ServerConnection {
    fn start(&self) -> ADBResult<()> {
        ServerConnection::start(self)
    }

    fn become_root(&self) -> ADBResult<()> {
        ServerConnection::become_root(self)
    }

    fn install_package(&self, apk_path: &str) -> ADBResult<()> {
        ServerConnection::install_package(self, apk_path)
    }

    fn dial(&self) -> ADBResult<Box<dyn Connection>> {
        ServerConnection::dial(self)
    }
}
