use crate::error::{ADBError, ADBResult};
use log::trace;
use std::fmt;
use std::fs;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// 子进程调用失败的原因
#[derive(Debug, Error)]
pub enum ProcessError {
    /// 无法启动进程或读取其输出
    #[error("无法执行命令: {0}")]
    Io(#[from] io::Error),

    /// 进程以非零状态退出
    #[error("{description}")]
    Exited {
        code: Option<i32>,
        description: String,
    },
}

impl ProcessError {
    pub fn exited(status: ExitStatus) -> Self {
        ProcessError::Exited {
            code: status.code(),
            description: status.to_string(),
        }
    }

    /// 退出码；被信号终止或未能启动时为 `None`
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ProcessError::Exited { code, .. } => *code,
            ProcessError::Io(_) => None,
        }
    }
}

/// 一次子进程调用的结果：合并后的输出以及执行状态
///
/// `status` 在进程无法启动或以非零状态退出时为 `Err`，此时 `output` 仍保留已捕获的内容。
#[derive(Debug)]
pub struct CommandOutput {
    pub output: Vec<u8>,
    pub status: Result<(), ProcessError>,
}

impl CommandOutput {
    /// 成功的调用
    pub fn success(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            status: Ok(()),
        }
    }

    /// 失败的调用，保留已捕获的输出
    pub fn failure(output: impl Into<Vec<u8>>, error: impl Into<ProcessError>) -> Self {
        Self {
            output: output.into(),
            status: Err(error.into()),
        }
    }

    /// 调用是否成功
    pub fn is_success(&self) -> bool {
        self.status.is_ok()
    }

    pub fn exit_code(&self) -> Option<i32> {
        match &self.status {
            Ok(()) => Some(0),
            Err(e) => e.exit_code(),
        }
    }

    /// 去掉首尾空白后的输出文本
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.output).trim().to_string()
    }
}

/// 操作系统交互能力：路径查找、可执行文件检查和子进程调用
pub trait ProcessEnvironment: fmt::Debug + Send + Sync {
    /// 在搜索路径中查找可执行文件
    fn look_path(&self, name: &str) -> ADBResult<PathBuf>;

    /// 确认路径存在且是当前用户可执行的普通文件
    fn is_executable_file(&self, path: &Path) -> ADBResult<()>;

    /// 执行命令并捕获 stdout 与 stderr（按写入顺序交织）
    fn combined_output(&self, program: &Path, args: &[&str]) -> CommandOutput;
}

/// 基于真实操作系统调用的实现
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEnvironment;

impl ProcessEnvironment for LocalEnvironment {
    fn look_path(&self, name: &str) -> ADBResult<PathBuf> {
        which::which(name)
            .map_err(|e| ADBError::wrap(e, format!("lookup of {} failed", name)))
    }

    fn is_executable_file(&self, path: &Path) -> ADBResult<()> {
        let metadata = fs::metadata(path)
            .map_err(|e| ADBError::wrap(e, format!("cannot stat {}", path.display())))?;

        if !metadata.is_file() {
            return Err(ADBError::server_not_available(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        check_user_executable(path)
    }

    fn combined_output(&self, program: &Path, args: &[&str]) -> CommandOutput {
        trace!("执行命令: {} {:?}", program.display(), args);

        match run_combined(program, args) {
            Ok(output) => output,
            Err(e) => CommandOutput::failure(Vec::new(), e),
        }
    }
}

// stdout 与 stderr 共用同一个文件描述，输出按子进程写入的顺序排列
fn run_combined(program: &Path, args: &[&str]) -> io::Result<CommandOutput> {
    let mut sink = tempfile::tempfile()?;
    let stdout = sink.try_clone()?;
    let stderr = sink.try_clone()?;

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .status()?;

    sink.seek(SeekFrom::Start(0))?;
    let mut output = Vec::new();
    sink.read_to_end(&mut output)?;

    if status.success() {
        Ok(CommandOutput::success(output))
    } else {
        Ok(CommandOutput::failure(output, ProcessError::exited(status)))
    }
}

#[cfg(unix)]
fn check_user_executable(path: &Path) -> ADBResult<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| ADBError::wrap(e, format!("invalid path {}", path.display())))?;

    // 按有效用户与组判断，与 exec 时的权限检查一致
    let rc = unsafe { libc::access(c_path.as_ptr(), libc::X_OK) };
    if rc != 0 {
        return Err(ADBError::wrap(
            io::Error::last_os_error(),
            format!("{} is not executable", path.display()),
        ));
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_user_executable(_path: &Path) -> ADBResult<()> {
    Ok(())
}
