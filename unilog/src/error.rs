//! 로거 에러 정의
//!
//! 백엔드 구성 단계마다 명시적인 에러 종류를 반환하고,
//! Facade 경계에서 한 번에 degraded 상태로 변환합니다.

use std::path::PathBuf;
use thiserror::Error;

/// 로깅 시스템 에러
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("파일 I/O 오류 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("출력 스트림 쓰기 실패: {0}")]
    Stream(#[source] std::io::Error),

    #[error("JSON 처리 오류: {0}")]
    Json(#[from] serde_json::Error),

    #[error("잘못된 카테고리: {0:?}")]
    InvalidCategory(String),

    #[error("알 수 없는 카테고리: {0}")]
    UnknownCategory(String),

    #[error("카테고리 {category}가 존재하지 않는 appender {appender}를 참조함")]
    UnknownAppender { category: String, appender: String },

    #[error("default 카테고리가 설정되지 않음")]
    MissingDefaultCategory,

    #[error("카테고리 {0}에 appender가 하나도 없음")]
    EmptyCategory(String),

    #[error("잘못된 로그 레벨: {0}")]
    InvalidLevel(String),

    #[error("잘못된 파일 크기 값: {0}")]
    InvalidSize(String),

    #[error("잘못된 보관 정책 값: {0}")]
    InvalidRetention(String),

    #[error("access log 형식 오류: {0}")]
    AccessFormat(String),

    #[error("백엔드를 사용할 수 없음: {0}")]
    BackendUnavailable(&'static str),
}

/// Result 타입 별칭
pub type LoggerResult<T> = Result<T, LoggerError>;

impl LoggerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
