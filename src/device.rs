use serde::{Deserialize, Serialize};
use std::fmt;

/// 设备选择条件的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    Any,
    Serial,
    Usb,
    Local,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Any => write!(f, "Any"),
            DeviceKind::Serial => write!(f, "Serial"),
            DeviceKind::Usb => write!(f, "Usb"),
            DeviceKind::Local => write!(f, "Local"),
        }
    }
}

/// 描述 ADB 请求要作用于哪台设备
///
/// 每种选择方式对应两种协议字符串：
///
/// | 选择方式 | 主机前缀 | 传输描述符 |
/// |---|---|---|
/// | 任意设备 | `host` | `transport-any` |
/// | 指定序列号 | `host-Serial:<serial>` | `transport:<serial>` |
/// | 任意 USB 设备 | `host-usb` | `transport-usb` |
/// | 任意本地/网络设备 | `host-local` | `transport-local` |
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceDescriptor {
    #[default]
    Any,
    /// 序列号原样保存，不做校验或转义
    Serial(String),
    Usb,
    Local,
}

impl DeviceDescriptor {
    /// 任意设备
    pub fn any() -> Self {
        DeviceDescriptor::Any
    }

    /// 任意 USB 设备
    pub fn any_usb() -> Self {
        DeviceDescriptor::Usb
    }

    /// 任意本地（模拟器/网络）设备
    pub fn any_local() -> Self {
        DeviceDescriptor::Local
    }

    /// 指定序列号的设备，空字符串也会被接受
    pub fn with_serial(serial: impl Into<String>) -> Self {
        DeviceDescriptor::Serial(serial.into())
    }

    /// 选择条件的类别
    pub fn kind(&self) -> DeviceKind {
        match self {
            DeviceDescriptor::Any => DeviceKind::Any,
            DeviceDescriptor::Serial(_) => DeviceKind::Serial,
            DeviceDescriptor::Usb => DeviceKind::Usb,
            DeviceDescriptor::Local => DeviceKind::Local,
        }
    }

    /// 序列号，仅 `Serial` 时存在
    pub fn serial(&self) -> Option<&str> {
        match self {
            DeviceDescriptor::Serial(serial) => Some(serial),
            _ => None,
        }
    }

    /// 主机选择前缀，用于 `<prefix>:<request>` 形式的主机命令
    pub fn host_prefix(&self) -> String {
        match self {
            DeviceDescriptor::Any => "host".to_string(),
            DeviceDescriptor::Usb => "host-usb".to_string(),
            DeviceDescriptor::Local => "host-local".to_string(),
            DeviceDescriptor::Serial(serial) => format!("host-Serial:{}", serial),
        }
    }

    /// 传输描述符，用于 `host:<descriptor>` 形式的传输切换请求
    pub fn transport_descriptor(&self) -> String {
        match self {
            DeviceDescriptor::Any => "transport-any".to_string(),
            DeviceDescriptor::Usb => "transport-usb".to_string(),
            DeviceDescriptor::Local => "transport-local".to_string(),
            DeviceDescriptor::Serial(serial) => format!("transport:{}", serial),
        }
    }

    /// 诊断用的显示形式
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceDescriptor::Serial(serial) => write!(f, "{}[{}]", self.kind(), serial),
            _ => write!(f, "{}", self.kind()),
        }
    }
}
