//! 로거 설정 관리
//!
//! # Data Flow
//! ```text
//! 호스트 설정 (config/default.json 의 logger 섹션)
//!     → host.rs (로드)
//!     → merge.rs (structuredLog / rotatingLog / accessLog 별 병합)
//!     → LoggerOptions (병합 완료, 생성 이후 불변)
//! ```

pub mod access;
pub mod host;
pub mod merge;
pub mod rotating;
pub mod structured;

pub use access::AccessLogOptions;
pub use host::HostConfig;
pub use merge::{merge_namespace, merge_options};
pub use rotating::{ConsoleTransportConfig, FileTransportConfig, FormatConfig, RotatingLogOptions};
pub use structured::{AppenderConfig, CategoryConfig, StructuredLogOptions, DEFAULT_CATEGORY};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 병합이 끝난 전체 로거 설정
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerOptions {
    pub structured_log: StructuredLogOptions,
    pub rotating_log: RotatingLogOptions,
    pub access_log: AccessLogOptions,
}

impl LoggerOptions {
    /// 모든 기본 파일 경로를 `dir` 아래로 둔 기본 설정
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            structured_log: StructuredLogOptions::in_dir(dir.as_ref()),
            rotating_log: RotatingLogOptions::in_dir(dir.as_ref()),
            access_log: AccessLogOptions::default(),
        }
    }
}
