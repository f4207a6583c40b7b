//! 구조화 로그 백엔드
//!
//! 이름 있는 appender와 카테고리로 구성됩니다. 카테고리는 최소 레벨과
//! 순서 있는 appender 목록을 가지며, 한 레코드는 목록의 모든 appender로 전달됩니다.
//!
//! # 사용 예시
//! ```rust,no_run
//! use unilog::config::StructuredLogOptions;
//! use unilog::structured::StructuredLog;
//!
//! let backend = StructuredLog::configure(&StructuredLogOptions::default())?;
//! backend.get_logger("system").trace("cache warmed")?;
//! # Ok::<(), unilog::LoggerError>(())
//! ```

pub mod appender;

pub use appender::{Appender, Record};

use chrono::Local;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::StructuredLogOptions;
use crate::error::{LoggerError, LoggerResult};
use crate::level::{LevelThreshold, LogLevel};
use crate::middleware::{RequestObserver, RequestSummary, ResponseSummary};
use appender::{open_appender, ConsoleAppender};

/// 구성이 끝난 구조화 로그 백엔드
#[derive(Clone)]
pub struct StructuredLog {
    categories: HashMap<String, CategoryLogger>,
}

impl StructuredLog {
    /// appender와 카테고리 등록
    ///
    /// 카테고리가 존재하지 않는 appender를 참조하면 실패합니다.
    pub fn configure(options: &StructuredLogOptions) -> LoggerResult<Self> {
        options.validate()?;

        let mut appenders: HashMap<&str, Arc<dyn Appender>> = HashMap::new();
        for (name, config) in &options.appenders {
            appenders.insert(name.as_str(), Arc::from(open_appender(config)?));
        }

        let mut categories = HashMap::new();
        for (name, config) in &options.categories {
            let threshold = config.level.parse::<LevelThreshold>()?;
            let targets = config
                .appenders
                .iter()
                .map(|appender| {
                    appenders
                        .get(appender.as_str())
                        .cloned()
                        .ok_or_else(|| LoggerError::UnknownAppender {
                            category: name.clone(),
                            appender: appender.clone(),
                        })
                })
                .collect::<LoggerResult<Vec<_>>>()?;

            categories.insert(
                name.clone(),
                CategoryLogger {
                    name: Arc::from(name.as_str()),
                    threshold,
                    appenders: targets,
                },
            );
        }

        debug!(
            appenders = appenders.len(),
            categories = categories.len(),
            "구조화 로그 백엔드 구성 완료"
        );

        Ok(Self { categories })
    }

    /// 카테고리 이름으로 로거 조회
    pub fn try_get_logger(&self, category: &str) -> LoggerResult<CategoryLogger> {
        if category.trim().is_empty() {
            return Err(LoggerError::InvalidCategory(category.to_string()));
        }

        self.categories
            .get(category)
            .cloned()
            .ok_or_else(|| LoggerError::UnknownCategory(category.to_string()))
    }

    /// 카테고리 이름으로 로거 조회
    ///
    /// 조회에 실패하면 표준 에러로 알리고 콘솔 전용 로거를 돌려줍니다.
    pub fn get_logger(&self, category: &str) -> CategoryLogger {
        match self.try_get_logger(category) {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("구조화 로거 조회 실패: {}", e);
                CategoryLogger::console_only(category)
            }
        }
    }

    /// 카테고리에 요청 로그를 남기는 observer
    pub fn request_observer(&self, category: &str) -> LoggerResult<StructuredRequestObserver> {
        Ok(StructuredRequestObserver {
            logger: self.try_get_logger(category)?,
        })
    }
}

/// 카테고리 하나에 대한 로거 핸들
#[derive(Clone)]
pub struct CategoryLogger {
    name: Arc<str>,
    threshold: LevelThreshold,
    appenders: Vec<Arc<dyn Appender>>,
}

impl CategoryLogger {
    /// 콘솔에만 기록하는 degraded 로거
    pub fn console_only(category: &str) -> Self {
        Self {
            name: Arc::from(category),
            threshold: LevelThreshold::All,
            appenders: vec![Arc::new(ConsoleAppender)],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.threshold.allows(level)
    }

    /// 레코드를 모든 appender로 전달
    ///
    /// 한 appender가 실패해도 나머지는 계속 기록하며, 첫 번째 에러를 반환합니다.
    pub fn log(&self, level: LogLevel, message: &str) -> LoggerResult<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let record = Record {
            timestamp: Local::now(),
            level,
            category: &self.name,
            message,
        };

        let mut first_error = None;
        for appender in &self.appenders {
            if let Err(e) = appender.append(&record) {
                eprintln!("appender 기록 실패 ({}): {}", self.name, e);
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    pub fn trace(&self, message: &str) -> LoggerResult<()> {
        self.log(LogLevel::Trace, message)
    }

    pub fn debug(&self, message: &str) -> LoggerResult<()> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LoggerResult<()> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LoggerResult<()> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LoggerResult<()> {
        self.log(LogLevel::Error, message)
    }

    pub fn fatal(&self, message: &str) -> LoggerResult<()> {
        self.log(LogLevel::Fatal, message)
    }
}

/// 응답 완료 후 카테고리에 접속 로그를 남기는 observer
pub struct StructuredRequestObserver {
    logger: CategoryLogger,
}

impl StructuredRequestObserver {
    fn render(request: &RequestSummary, response: &ResponseSummary) -> String {
        format!(
            "{} - - \"{} {} HTTP/{}\" {} {} \"{}\" \"{}\"",
            request.remote_addr,
            request.method,
            request.url,
            request.http_version,
            response.status,
            response.header("content-length").unwrap_or("-"),
            request.header("referer").unwrap_or("-"),
            request.header("user-agent").unwrap_or("-"),
        )
    }
}

impl RequestObserver for StructuredRequestObserver {
    fn on_response(
        &self,
        request: &RequestSummary,
        response: &ResponseSummary,
        _elapsed: Duration,
    ) -> LoggerResult<()> {
        self.logger.info(&Self::render(request, response))
    }
}
