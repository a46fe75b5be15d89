mod error;
mod config;
mod device;

// 功能模块
pub mod dial;
pub mod env;
pub mod server;

// 导出主要类型
pub use config::{ServerConfig, ServerConfigBuilder, ADB_EXECUTABLE_NAME, ADB_PORT, DEFAULT_HOST};
pub use device::{DeviceDescriptor, DeviceKind};
pub use dial::{Connection, Dialer, TcpDialer};
pub use env::{CommandOutput, LocalEnvironment, ProcessEnvironment, ProcessError};
pub use error::{ADBError, ADBResult, BoxError};
pub use server::{AdbServer, ServerConnection};

// 便利的预导出模块
pub mod prelude {
    pub use super::{
        ADBError, ADBResult, AdbServer, DeviceDescriptor, ServerConfig, ServerConfigBuilder,
        ServerConnection,
    };
}
