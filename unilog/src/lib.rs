//! unilog - 통합 로깅 Facade
//!
//! 구조화 로그(카테고리/appender), 날짜별 순환 파일 로그, HTTP access log
//! 세 백엔드를 하나의 `Logger` 뒤에 묶습니다.
//!
//! # 모듈 구성
//! - `config`: 기본 설정, 호스트 설정 로드, 네임스페이스별 병합
//! - `structured`: 카테고리와 appender 기반 구조화 로그
//! - `rotating`: 콘솔 + 날짜별 순환 파일 로그
//! - `access`: access log 포맷 컴파일과 렌더링
//! - `middleware`: actix-web 요청 로그 미들웨어
//! - `facade`: 백엔드 조립과 실패 격리
//!
//! # 사용 예시
//! ```rust,no_run
//! use unilog::{create_logger, HostConfig};
//!
//! let logger = create_logger(&HostConfig::from_env());
//! logger.info(&[&"server started", &8080]);
//! logger.trace("cache warmed", "system");
//! ```

pub mod access;
pub mod config;
pub mod decorator;
pub mod error;
pub mod facade;
pub mod level;
pub mod middleware;
pub mod rotating;
pub mod structured;
pub mod timefmt;

pub use access::AccessLogFormat;
pub use config::{HostConfig, LoggerOptions};
pub use decorator::{decorate, Color, Style};
pub use error::{LoggerError, LoggerResult};
pub use facade::{ConsoleLogger, LevelLogger, Logger, LoggerBuilder, LoggerState};
pub use level::{LevelThreshold, LogLevel};
pub use middleware::{RequestLogger, RequestObserver, RequestSummary, ResponseSummary};
pub use rotating::{LineFormat, LineParts, RotatingLogger};
pub use structured::{CategoryLogger, StructuredLog};

/// 호스트 설정으로 로거 생성
///
/// 백엔드 구성이 실패해도 콘솔 로거로 동작하는 `Logger`를 돌려줍니다.
pub fn create_logger(host: &HostConfig) -> Logger {
    LoggerBuilder::new().host_config(host).build()
}
