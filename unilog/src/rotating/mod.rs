//! 순환 파일 로거 백엔드
//!
//! 콘솔 transport와 날짜별 순환 파일 transport 두 개로 구성되며,
//! 모든 레코드는 레이블 → 타임스탬프 → 라인 포맷 순서로 렌더링됩니다.
//!
//! # 사용 예시
//! ```rust,no_run
//! use unilog::config::RotatingLogOptions;
//! use unilog::rotating::{LineFormat, RotatingLogger};
//! use unilog::LogLevel;
//!
//! let logger = RotatingLogger::build(&RotatingLogOptions::default(), LineFormat::BuiltIn)?;
//! logger.log(LogLevel::Info, "server started")?;
//! # Ok::<(), unilog::LoggerError>(())
//! ```

pub mod format;
pub mod transport;

pub use format::{FormatFn, LineFormat, LineParts};
pub use transport::{
    parse_retention, parse_size, ConsoleTransport, DailyRotateFile, Retention, Transport,
    TransportStyle,
};

use chrono::Local;
use parking_lot::Mutex;
use std::sync::{Arc, Once, Weak};
use std::time::Duration;
use tracing::debug;

use crate::config::RotatingLogOptions;
use crate::error::LoggerResult;
use crate::facade::LevelLogger;
use crate::level::LogLevel;
use crate::middleware::{RequestObserver, RequestSummary, ResponseSummary};
use crate::timefmt;

struct Shared {
    label: String,
    level: LogLevel,
    timestamp_pattern: String,
    exit_on_error: bool,
    format: LineFormat,
    transports: Vec<Box<dyn Transport>>,
}

/// panic을 기록할 로거 목록. hook은 프로세스에 한 번만 설치됨
static PANIC_TARGETS: Mutex<Vec<Weak<Shared>>> = parking_lot::const_mutex(Vec::new());
static PANIC_HOOK: Once = Once::new();

impl Shared {
    fn render(&self, transport: &dyn Transport, level: LogLevel, message: &str) -> String {
        self.render_with(&self.format, transport, level, message)
    }

    fn render_with(
        &self,
        format: &LineFormat,
        transport: &dyn Transport,
        level: LogLevel,
        message: &str,
    ) -> String {
        let timestamp = Local::now().format(&self.timestamp_pattern).to_string();
        let parts = LineParts {
            level,
            label: &self.label,
            timestamp: &timestamp,
            message,
        };
        let style = transport.style();
        format.render(&parts, style.colorize, style.json)
    }

    fn emit<'a, I>(&self, transports: I, level: LogLevel, message: &str) -> LoggerResult<()>
    where
        I: Iterator<Item = &'a Box<dyn Transport>>,
    {
        self.emit_with(&self.format, transports, level, message)
    }

    fn emit_with<'a, I>(
        &self,
        format: &LineFormat,
        transports: I,
        level: LogLevel,
        message: &str,
    ) -> LoggerResult<()>
    where
        I: Iterator<Item = &'a Box<dyn Transport>>,
    {
        let mut first_error = None;
        for transport in transports {
            let line = self.render_with(format, transport.as_ref(), level, message);
            if let Err(e) = transport.write_line(&line) {
                eprintln!("{} transport 기록 실패: {}", transport.name(), e);
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

/// 순환 파일 로거
#[derive(Clone)]
pub struct RotatingLogger {
    shared: Arc<Shared>,
}

impl RotatingLogger {
    /// 옵션 검증 후 transport 생성
    ///
    /// 레벨, `maxSize`, `maxFiles` 파싱 실패나 로그 디렉토리 생성 실패는 에러로 반환됩니다.
    pub fn build(options: &RotatingLogOptions, format: LineFormat) -> LoggerResult<Self> {
        let level = options.level.parse::<LogLevel>()?;
        let transports: Vec<Box<dyn Transport>> = vec![
            Box::new(ConsoleTransport::new(&options.console)),
            Box::new(DailyRotateFile::open(&options.file)?),
        ];

        let shared = Arc::new(Shared {
            label: options.label.clone(),
            level,
            timestamp_pattern: timefmt::to_chrono(&options.format.timestamp),
            exit_on_error: options.exit_on_error,
            format,
            transports,
        });

        if shared.transports.iter().any(|t| t.handles_exceptions()) {
            register_panic_target(&shared);
        }

        debug!(
            label = %shared.label,
            level = %shared.level,
            exit_on_error = shared.exit_on_error,
            "순환 파일 로거 생성 완료"
        );

        Ok(Self { shared })
    }

    pub fn label(&self) -> &str {
        &self.shared.label
    }

    pub fn level(&self) -> LogLevel {
        self.shared.level
    }

    /// 레벨 이상인 레코드를 모든 transport에 기록
    pub fn log(&self, level: LogLevel, message: &str) -> LoggerResult<()> {
        if level < self.shared.level {
            return Ok(());
        }

        self.shared
            .emit(self.shared.transports.iter(), level, message)
    }

    /// 콘솔 transport 스타일로 렌더링한 한 줄
    pub fn format_line(&self, level: LogLevel, message: &str) -> String {
        match self.shared.transports.first() {
            Some(transport) => self.shared.render(transport.as_ref(), level, message),
            None => message.to_string(),
        }
    }

    /// 응답 완료 후 요청 요약을 INFO로 남기는 observer
    pub fn request_observer(&self) -> RotatingRequestObserver {
        RotatingRequestObserver {
            logger: self.clone(),
        }
    }
}

impl LevelLogger for RotatingLogger {
    fn log(&self, level: LogLevel, message: &str) -> LoggerResult<()> {
        RotatingLogger::log(self, level, message)
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        RotatingLogger::format_line(self, level, message)
    }
}

/// panic 기록 대상 등록
///
/// drop된 로거는 등록 시점에 정리되며, 전역 hook은 처음 한 번만 설치됩니다.
fn register_panic_target(shared: &Arc<Shared>) {
    {
        let mut targets = PANIC_TARGETS.lock();
        targets.retain(|target| target.strong_count() > 0);
        targets.push(Arc::downgrade(shared));
    }

    PANIC_HOOK.call_once(install_panic_hook);
}

#[cfg(test)]
fn panic_target_count() -> usize {
    PANIC_TARGETS.lock().len()
}

/// 살아 있는 로거마다 panic 메시지를 ERROR로 남긴 뒤 이전 hook 호출
///
/// hook 안에서는 사용자 정의 포맷 대신 기본 포맷을 사용합니다.
/// 사용자 정의 포맷 함수 안의 panic은 렌더링 단계에서 처리되므로 이전 hook으로만 전달합니다.
fn install_panic_hook() {
    let previous = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        if format::in_custom_format() {
            previous(info);
            return;
        }

        let targets: Vec<Arc<Shared>> = match PANIC_TARGETS.try_lock() {
            Some(targets) => targets.iter().filter_map(Weak::upgrade).collect(),
            None => Vec::new(),
        };

        let message = format!("uncaughtException: {}", info);
        for shared in &targets {
            let _ = shared.emit_with(
                &LineFormat::BuiltIn,
                shared.transports.iter().filter(|t| t.handles_exceptions()),
                LogLevel::Error,
                &message,
            );
        }

        previous(info);

        if targets.iter().any(|shared| shared.exit_on_error) {
            std::process::exit(1);
        }
    }));
}

/// `<METHOD> <url> <status> <elapsed>ms <ip>` 형식의 요청 로그 observer
pub struct RotatingRequestObserver {
    logger: RotatingLogger,
}

impl RotatingRequestObserver {
    pub fn render(request: &RequestSummary, response: &ResponseSummary, elapsed: Duration) -> String {
        format!(
            "{} {} {} {}ms {}",
            request.method,
            request.url,
            response.status,
            elapsed.as_millis(),
            request.remote_addr
        )
    }
}

impl RequestObserver for RotatingRequestObserver {
    fn on_response(
        &self,
        request: &RequestSummary,
        response: &ResponseSummary,
        elapsed: Duration,
    ) -> LoggerResult<()> {
        self.logger
            .log(LogLevel::Info, &Self::render(request, response, elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoggerError;
    use tempfile::TempDir;

    fn options(dir: &std::path::Path) -> RotatingLogOptions {
        let mut options = RotatingLogOptions::in_dir(dir);
        options.console.handle_exceptions = false;
        options.file.handle_exceptions = false;
        options.file.colorize = false;
        options
    }

    fn read_active(dir: &std::path::Path) -> String {
        let today = Local::now().format("%Y-%m-%d").to_string();
        std::fs::read_to_string(dir.join(format!("app-{}.log", today)))
            .expect("Test assertion failed")
    }

    #[test]
    fn test_level_filter() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let mut options = options(temp_dir.path());
        options.level = "warn".to_string();

        let logger = RotatingLogger::build(&options, LineFormat::BuiltIn).expect("Test assertion failed");
        logger.log(LogLevel::Info, "dropped").expect("Test assertion failed");
        logger.log(LogLevel::Error, "kept").expect("Test assertion failed");

        let content = read_active(temp_dir.path());
        assert!(content.contains("[LOGGER: ERROR]"));
        assert!(content.contains("kept"));
        assert!(!content.contains("dropped"));
    }

    #[test]
    fn test_format_line_default() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let logger = RotatingLogger::build(&options(temp_dir.path()), LineFormat::BuiltIn)
            .expect("Test assertion failed");

        let line = logger.format_line(LogLevel::Info, "hello");
        assert!(line.contains("LOGGER"));
        assert!(line.contains("INFO"));
        assert!(line.contains("hello"));
        assert!(line.contains("[TIME:"));
    }

    #[test]
    fn test_custom_formatter_and_label() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let mut options = options(temp_dir.path());
        options.label = "API".to_string();

        let format = LineFormat::custom(|p| format!("{}|{}|{}", p.label, p.level.as_lower(), p.message));
        let logger = RotatingLogger::build(&options, format).expect("Test assertion failed");
        logger.log(LogLevel::Debug, "custom").expect("Test assertion failed");

        assert_eq!(read_active(temp_dir.path()), "API|debug|custom\n");
    }

    #[test]
    fn test_invalid_options_fail_build() {
        let temp_dir = TempDir::new().expect("Test assertion failed");

        let mut bad_level = options(temp_dir.path());
        bad_level.level = "loud".to_string();
        assert!(matches!(
            RotatingLogger::build(&bad_level, LineFormat::BuiltIn),
            Err(LoggerError::InvalidLevel(_))
        ));

        let mut bad_size = options(temp_dir.path());
        bad_size.file.max_size = "big".to_string();
        assert!(matches!(
            RotatingLogger::build(&bad_size, LineFormat::BuiltIn),
            Err(LoggerError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_dropped_loggers_leave_panic_registry() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let mut options = options(temp_dir.path());
        options.file.handle_exceptions = true;

        for _ in 0..32 {
            let logger = RotatingLogger::build(&options, LineFormat::BuiltIn).expect("Test assertion failed");
            drop(logger);
        }
        let kept = RotatingLogger::build(&options, LineFormat::BuiltIn).expect("Test assertion failed");

        // 다른 테스트가 동시에 만든 로거만큼의 여유
        assert!(panic_target_count() < 16);
        assert_eq!(kept.label(), "LOGGER");
    }

    #[test]
    fn test_request_line() {
        let request = RequestSummary {
            method: "GET".to_string(),
            url: "/health?full=1".to_string(),
            http_version: "1.1".to_string(),
            remote_addr: "127.0.0.1".to_string(),
            headers: Vec::new(),
        };
        let response = ResponseSummary {
            status: 200,
            headers: Vec::new(),
        };

        assert_eq!(
            RotatingRequestObserver::render(&request, &response, Duration::from_millis(12)),
            "GET /health?full=1 200 12ms 127.0.0.1"
        );
    }
}
