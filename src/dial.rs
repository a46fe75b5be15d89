use crate::error::{ADBError, ADBResult};
use log::trace;
use std::fmt;
use std::io::{Read, Write};
use std::net::TcpStream;

/// 与 ADB 服务器之间的双向字节流
///
/// 请求的分帧与读写循环由上层负责。
pub trait Connection: Read + Write + Send {}

impl<T: Read + Write + Send> Connection for T {}

/// 建立到 ADB 服务器的连接
pub trait Dialer: fmt::Debug + Send + Sync {
    fn dial(&self, address: &str) -> ADBResult<Box<dyn Connection>>;
}

/// 通过 TCP 连接服务器
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpDialer;

impl Dialer for TcpDialer {
    fn dial(&self, address: &str) -> ADBResult<Box<dyn Connection>> {
        trace!("连接 ADB 服务器 {}", address);
        let stream = TcpStream::connect(address)
            .map_err(|e| ADBError::wrap(e, format!("error dialing {}", address)))?;
        Ok(Box::new(stream))
    }
}
