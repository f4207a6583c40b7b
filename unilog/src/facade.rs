//! 통합 로거 Facade
//!
//! 세 백엔드(구조화 로그, 순환 파일 로그, access log)를 하나의 객체 뒤에 묶습니다.
//!
//! # 상태 전이
//! ```text
//! LoggerBuilder (Uninitialized → Initializing)
//!     → build() → Ready     (모든 백엔드 구성 성공, 활성 인스턴스 = 순환 파일 로거)
//!               → Degraded  (구성 실패, 활성 인스턴스 = 콘솔 로거)
//! ```
//!
//! 구조화 로그는 순환 파일 로거보다 먼저 구성되며, 순환 파일 로거만 실패하면
//! 구조화 로그 백엔드(`trace`, 카테고리 미들웨어)는 계속 동작합니다.
//!
//! 어떤 백엔드 실패도 호출자에게 전파되지 않습니다. 구성 실패는 Degraded 상태로,
//! 기록 실패는 표준 에러 출력으로, 미들웨어 구성 실패는 pass-through 미들웨어로 바뀝니다.

use serde_json::Value;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::access::AccessLogObserver;
use crate::config::{merge_options, HostConfig, LoggerOptions};
use crate::error::{LoggerError, LoggerResult};
use crate::level::LogLevel;
use crate::middleware::RequestLogger;
use crate::rotating::{LineFormat, RotatingLogger};
use crate::structured::{CategoryLogger, StructuredLog};

/// 활성 인스턴스가 제공하는 레벨별 기록 인터페이스
pub trait LevelLogger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str) -> LoggerResult<()>;

    /// 이 인스턴스의 포맷으로 렌더링한 한 줄
    fn format_line(&self, level: LogLevel, message: &str) -> String;

    fn info(&self, message: &str) -> LoggerResult<()> {
        self.log(LogLevel::Info, message)
    }

    fn warn(&self, message: &str) -> LoggerResult<()> {
        self.log(LogLevel::Warn, message)
    }

    fn error(&self, message: &str) -> LoggerResult<()> {
        self.log(LogLevel::Error, message)
    }

    fn debug(&self, message: &str) -> LoggerResult<()> {
        self.log(LogLevel::Debug, message)
    }
}

/// 백엔드 구성 실패 시 사용하는 콘솔 로거
///
/// WARN 이상은 표준 에러, 나머지는 표준 출력으로 기록합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger;

impl LevelLogger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) -> LoggerResult<()> {
        let line = self.format_line(level, message);
        let result = if level >= LogLevel::Warn {
            writeln!(io::stderr().lock(), "{}", line)
        } else {
            writeln!(io::stdout().lock(), "{}", line)
        };
        result.map_err(LoggerError::Stream)
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        format!("[{}] {}", level.as_str(), message)
    }
}

/// 구성 결과 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerState {
    Ready,
    Degraded,
}

struct Inner {
    options: LoggerOptions,
    state: LoggerState,
    instance: Arc<dyn LevelLogger>,
    structured: Option<StructuredLog>,
    rotating: Option<RotatingLogger>,
}

/// 통합 로거
///
/// 복제 비용이 낮으며(`Arc`), 호스트의 조립 지점에서 한 번 만들어 공유합니다.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

/// `Logger` 생성기
#[derive(Default)]
pub struct LoggerBuilder {
    overrides: Option<Value>,
    log_dir: Option<PathBuf>,
    format: LineFormat,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `logger` 섹션 형태의 부분 설정
    pub fn config(mut self, overrides: &Value) -> Self {
        self.overrides = Some(overrides.clone());
        self
    }

    /// 호스트 설정의 `logger` 섹션과 로그 디렉토리 사용
    pub fn host_config(mut self, host: &HostConfig) -> Self {
        self.overrides = host.logger_section().cloned();
        if let Some(dir) = host.log_dir() {
            self.log_dir = Some(dir.to_path_buf());
        }
        self
    }

    /// 기본 파일 경로의 기준 디렉토리
    pub fn log_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// 순환 파일 로거 라인 포맷
    pub fn formatter(mut self, format: LineFormat) -> Self {
        self.format = format;
        self
    }

    /// 로거 생성. 실패하지 않으며, 백엔드 구성 실패 시 Degraded 상태가 됨
    pub fn build(self) -> Logger {
        let defaults = match &self.log_dir {
            Some(dir) => LoggerOptions::in_dir(dir),
            None => LoggerOptions::default(),
        };
        let options = merge_options(&defaults, self.overrides.as_ref());

        let inner = match compose(&options, self.format) {
            Ok((structured, rotating)) => {
                info!(label = %rotating.label(), level = %rotating.level(), "로거 초기화 완료");
                Inner {
                    options,
                    state: LoggerState::Ready,
                    instance: Arc::new(rotating.clone()),
                    structured: Some(structured),
                    rotating: Some(rotating),
                }
            }
            Err((structured, e)) => {
                eprintln!("로거 백엔드 초기화 실패, 콘솔 로거로 대체: {}", e);
                error!(
                    error = %e,
                    structured = structured.is_some(),
                    "로거 백엔드 초기화 실패, 콘솔 로거로 대체"
                );
                Inner {
                    options,
                    state: LoggerState::Degraded,
                    instance: Arc::new(ConsoleLogger),
                    structured,
                    rotating: None,
                }
            }
        };

        Logger {
            inner: Arc::new(inner),
        }
    }
}

/// 구조화 로그 → 순환 파일 로거 순서로 구성
///
/// 실패 시 그때까지 구성된 구조화 로그 백엔드를 에러와 함께 돌려줍니다.
fn compose(
    options: &LoggerOptions,
    format: LineFormat,
) -> Result<(StructuredLog, RotatingLogger), (Option<StructuredLog>, LoggerError)> {
    let structured = StructuredLog::configure(&options.structured_log).map_err(|e| (None, e))?;
    match RotatingLogger::build(&options.rotating_log, format) {
        Ok(rotating) => Ok((structured, rotating)),
        Err(e) => Err((Some(structured), e)),
    }
}

/// 값 하나를 로그 메시지로 변환
///
/// 문자열은 그대로, 그 밖의 값은 `Debug` 표현으로 기록합니다.
fn render_value(value: &dyn fmt::Debug) -> String {
    let rendered = format!("{:?}", value);
    rendered
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .and_then(unescape_debug)
        .unwrap_or(rendered)
}

/// 문자열 `Debug` 표현의 따옴표 안쪽을 원래 문자열로 복원
///
/// 이스케이프되지 않은 `"`가 있거나 알 수 없는 이스케이프면 `None`
fn unescape_debug(quoted: &str) -> Option<String> {
    let mut text = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => return None,
            '\\' => {}
            c => {
                text.push(c);
                continue;
            }
        }

        let unescaped = match chars.next()? {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '0' => '\0',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            'u' => {
                if chars.next()? != '{' {
                    return None;
                }
                let mut hex = String::new();
                loop {
                    match chars.next()? {
                        '}' => break,
                        digit if digit.is_ascii_hexdigit() => hex.push(digit),
                        _ => return None,
                    }
                }
                char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?
            }
            _ => return None,
        };
        text.push(unescaped);
    }

    Some(text)
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// 환경변수와 `.env`로 지정된 호스트 설정으로 생성
    pub fn from_env() -> Self {
        LoggerBuilder::new()
            .host_config(&HostConfig::from_env())
            .build()
    }

    pub fn state(&self) -> LoggerState {
        self.inner.state
    }

    /// 병합이 끝난 설정
    pub fn options(&self) -> &LoggerOptions {
        &self.inner.options
    }

    pub fn structured(&self) -> Option<&StructuredLog> {
        self.inner.structured.as_ref()
    }

    pub fn rotating(&self) -> Option<&RotatingLogger> {
        self.inner.rotating.as_ref()
    }

    /// 활성 인스턴스 포맷으로 렌더링한 한 줄
    pub fn format_line(&self, level: LogLevel, message: &str) -> String {
        self.inner.instance.format_line(level, message)
    }

    fn emit(&self, level: LogLevel, values: &[&dyn fmt::Debug]) {
        for value in values {
            if let Err(e) = self.inner.instance.log(level, &render_value(*value)) {
                eprintln!("로그 기록 실패 ({}): {}", level, e);
            }
        }
    }

    /// 값마다 한 줄씩 INFO로 기록
    pub fn info(&self, values: &[&dyn fmt::Debug]) {
        self.emit(LogLevel::Info, values)
    }

    pub fn warn(&self, values: &[&dyn fmt::Debug]) {
        self.emit(LogLevel::Warn, values)
    }

    pub fn error(&self, values: &[&dyn fmt::Debug]) {
        self.emit(LogLevel::Error, values)
    }

    pub fn debug(&self, values: &[&dyn fmt::Debug]) {
        self.emit(LogLevel::Debug, values)
    }

    /// `info`와 동일
    pub fn write(&self, values: &[&dyn fmt::Debug]) {
        self.info(values)
    }

    /// 구조화 로그 카테고리에 TRACE 기록
    ///
    /// 빈 카테고리는 표준 에러로 알리고 무시합니다. 알 수 없는 카테고리나
    /// 구조화 로그 백엔드가 없는 경우 콘솔로 기록합니다.
    pub fn trace(&self, message: impl fmt::Display, category: &str) {
        if category.trim().is_empty() {
            eprintln!("trace 실패: {}", LoggerError::InvalidCategory(category.to_string()));
            return;
        }

        let logger = match &self.inner.structured {
            Some(structured) => structured.get_logger(category),
            None => CategoryLogger::console_only(category),
        };

        if let Err(e) = logger.trace(&message.to_string()) {
            eprintln!("trace 실패 ({}): {}", category, e);
        }
    }

    /// `system` 카테고리에 TRACE 기록
    pub fn trace_system(&self, message: impl fmt::Display) {
        self.trace(message, "system")
    }

    /// 아무 것도 하지 않음
    pub fn noop<T>(&self, _value: T) {}

    /// 구조화 로그 카테고리에 접속 로그를 남기는 미들웨어
    pub fn structured_log_middleware(&self, category: &str) -> RequestLogger {
        let observer = self
            .inner
            .structured
            .as_ref()
            .ok_or(LoggerError::BackendUnavailable("structured log"))
            .and_then(|structured| structured.request_observer(category));

        middleware_or_pass_through("structured log", observer.map(RequestLogger::new))
    }

    /// access log 형식으로 이 로거에 기록하는 미들웨어
    pub fn access_log_middleware(&self) -> RequestLogger {
        let observer = AccessLogObserver::from_options(&self.inner.options.access_log, self.clone());
        middleware_or_pass_through("access log", observer.map(RequestLogger::new))
    }

    /// 순환 파일 로거에 요청 요약을 남기는 미들웨어
    pub fn rotating_log_middleware(&self) -> RequestLogger {
        let observer = self
            .inner
            .rotating
            .as_ref()
            .map(RotatingLogger::request_observer)
            .ok_or(LoggerError::BackendUnavailable("rotating log"));

        middleware_or_pass_through("rotating log", observer.map(RequestLogger::new))
    }
}

fn middleware_or_pass_through(name: &str, result: LoggerResult<RequestLogger>) -> RequestLogger {
    result.unwrap_or_else(|e| {
        eprintln!("{} 미들웨어 생성 실패, pass-through 사용: {}", name, e);
        RequestLogger::pass_through()
    })
}

/// access log 등 바이트 스트림 출력 대상
///
/// 비어 있지 않은 줄마다 그대로 INFO로 기록합니다.
impl Write for &Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        for line in text.lines().filter(|line| !line.is_empty()) {
            self.inner
                .instance
                .log(LogLevel::Info, line)
                .map_err(io::Error::other)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("state", &self.inner.state)
            .field("options", &self.inner.options)
            .finish()
    }
}
