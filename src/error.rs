use std::error::Error as StdError;
use thiserror::Error;

/// 底层错误的装箱类型
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// ADB 服务器访问相关的错误类型
#[derive(Debug, Error)]
pub enum ADBError {
    /// ADB 服务器不可用：找不到可执行文件、无法启动服务器、拨号失败等
    #[error("ADB 服务器不可用: {message}")]
    ServerNotAvailable {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl ADBError {
    /// 创建不带底层错误的 `ServerNotAvailable`
    pub fn server_not_available(message: impl Into<String>) -> Self {
        ADBError::ServerNotAvailable {
            message: message.into(),
            source: None,
        }
    }

    /// 用 `ServerNotAvailable` 包装底层错误
    pub fn wrap<E>(source: E, message: impl Into<String>) -> Self
    where
        E: Into<BoxError>,
    {
        ADBError::ServerNotAvailable {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn is_server_not_available(&self) -> bool {
        matches!(self, ADBError::ServerNotAvailable { .. })
    }

    /// 错误消息（不含底层错误）
    pub fn message(&self) -> &str {
        match self {
            ADBError::ServerNotAvailable { message, .. } => message,
        }
    }
}

// 添加结果类型别名简化使用
pub type ADBResult<T> = Result<T, ADBError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_wrap_keeps_source() {
        let err = ADBError::wrap(
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
            "could not find adb in PATH",
        );

        assert!(err.is_server_not_available());
        assert_eq!(err.message(), "could not find adb in PATH");
        let source = err.source().expect("source should be attached");
        assert_eq!(source.to_string(), "no such file");
        assert!(err.to_string().contains("could not find adb in PATH"));
    }

    #[test]
    fn test_server_not_available_without_source() {
        let err = ADBError::server_not_available("boom");
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "ADB 服务器不可用: boom");
    }
}
