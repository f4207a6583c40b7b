//! 호스트 설정 로드
//!
//! 애플리케이션 설정 파일(JSON)에서 `logger` 섹션을 읽습니다.
//! 파일 경로와 로그 디렉토리는 환경변수(.env 포함)로 지정합니다.

use anyhow::{Context, Result};
use dotenv::dotenv;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 설정 파일 경로 환경변수
pub const CONFIG_PATH_ENV: &str = "UNILOG_CONFIG";
/// 기본 로그 디렉토리 환경변수
pub const LOG_DIR_ENV: &str = "UNILOG_LOG_DIR";
/// 설정 파일 기본 경로
pub const DEFAULT_CONFIG_PATH: &str = "config/default.json";

/// 호스트 애플리케이션 설정
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    root: Value,
    log_dir: Option<PathBuf>,
}

impl HostConfig {
    /// 환경변수에서 설정 로드
    ///
    /// 파일이 없거나 읽을 수 없으면 빈 설정을 돌려줍니다.
    pub fn from_env() -> Self {
        dotenv().ok();

        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "호스트 설정 로드 실패, 빈 설정 사용");
                Self::default()
            }
        };

        if let Ok(dir) = std::env::var(LOG_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.log_dir = Some(PathBuf::from(dir));
            }
        }

        config
    }

    /// JSON 설정 파일 로드. 파일이 없으면 빈 설정
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "호스트 설정 파일 없음");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("설정 파일 읽기 실패: {}", path.display()))?;
        let root: Value = serde_json::from_str(&content)
            .with_context(|| format!("설정 파일 파싱 실패: {}", path.display()))?;

        Ok(Self::from_value(root))
    }

    pub fn from_value(root: Value) -> Self {
        Self {
            root,
            log_dir: None,
        }
    }

    pub fn with_log_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// `logger` 섹션 (없으면 `None`)
    pub fn logger_section(&self) -> Option<&Value> {
        self.root.get("logger").filter(|section| !section.is_null())
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}
