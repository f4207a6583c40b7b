//! 구조화 로그 appender
//!
//! 크기 순환 파일, 날짜 순환 파일, 콘솔, 표준 출력 네 가지 출력 대상을 구현합니다.

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::AppenderConfig;
use crate::decorator::decorate;
use crate::error::{LoggerError, LoggerResult};
use crate::level::LogLevel;
use crate::timefmt;

/// appender에 전달되는 로그 레코드
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub category: &'a str,
    pub message: &'a str,
}

impl Record<'_> {
    /// `[2024-01-01T12:00:00.000] [INFO] system - message`
    pub fn layout(&self) -> String {
        format!("{} {}", self.prefix(), self.message)
    }

    fn prefix(&self) -> String {
        format!(
            "[{}] [{}] {} -",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S%.3f"),
            self.level.as_str(),
            self.category
        )
    }

    fn colored_layout(&self) -> String {
        format!(
            "{} {}",
            decorate(self.level.as_lower(), false).paint(&self.prefix()),
            self.message
        )
    }
}

/// 출력 대상
pub trait Appender: Send + Sync {
    fn append(&self, record: &Record<'_>) -> LoggerResult<()>;
}

/// 설정으로부터 appender 생성
pub fn open_appender(config: &AppenderConfig) -> LoggerResult<Box<dyn Appender>> {
    let appender: Box<dyn Appender> = match config {
        AppenderConfig::File {
            filename,
            max_log_size,
            backups,
        } => Box::new(FileAppender::open(filename, *max_log_size, *backups)?),
        AppenderConfig::DateFile { filename, pattern } => {
            Box::new(DateFileAppender::open(filename, pattern)?)
        }
        AppenderConfig::Console => Box::new(ConsoleAppender),
        AppenderConfig::Stdout => Box::new(StdoutAppender),
    };
    Ok(appender)
}

fn open_append(path: &Path) -> LoggerResult<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| LoggerError::io(parent, e))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggerError::io(path, e))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

struct FileState {
    file: File,
    size: u64,
}

/// 크기 기준 순환 파일
///
/// 다음 줄이 `max_log_size`를 넘기면 `x.log` → `x.log.1` → ... → `x.log.{backups}`
/// 순서로 밀어내고, 가장 오래된 파일은 삭제합니다.
pub struct FileAppender {
    path: PathBuf,
    max_log_size: u64,
    backups: u32,
    state: Mutex<FileState>,
}

impl FileAppender {
    pub fn open<P: AsRef<Path>>(path: P, max_log_size: u64, backups: u32) -> LoggerResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path)?;
        let size = file
            .metadata()
            .map_err(|e| LoggerError::io(&path, e))?
            .len();

        Ok(Self {
            path,
            max_log_size,
            backups,
            state: Mutex::new(FileState { file, size }),
        })
    }

    fn roll(&self, state: &mut FileState) -> LoggerResult<()> {
        state.file.flush().map_err(|e| LoggerError::io(&self.path, e))?;

        if self.backups == 0 {
            state.file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&self.path)
                .map_err(|e| LoggerError::io(&self.path, e))?;
            state.size = 0;
            return Ok(());
        }

        let oldest = with_suffix(&self.path, &format!(".{}", self.backups));
        if oldest.exists() {
            fs::remove_file(&oldest).map_err(|e| LoggerError::io(&oldest, e))?;
        }

        for index in (1..self.backups).rev() {
            let from = with_suffix(&self.path, &format!(".{}", index));
            if from.exists() {
                let to = with_suffix(&self.path, &format!(".{}", index + 1));
                fs::rename(&from, &to).map_err(|e| LoggerError::io(&from, e))?;
            }
        }

        let first = with_suffix(&self.path, ".1");
        fs::rename(&self.path, &first).map_err(|e| LoggerError::io(&self.path, e))?;

        state.file = open_append(&self.path)?;
        state.size = 0;

        debug!(path = %self.path.display(), backups = self.backups, "로그 파일 크기 순환 완료");
        Ok(())
    }
}

impl Appender for FileAppender {
    fn append(&self, record: &Record<'_>) -> LoggerResult<()> {
        let mut line = record.layout();
        line.push('\n');
        let len = line.len() as u64;

        let mut state = self.state.lock();
        if self.max_log_size > 0 && state.size > 0 && state.size + len > self.max_log_size {
            self.roll(&mut state)?;
        }

        state
            .file
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::io(&self.path, e))?;
        state.size += len;
        Ok(())
    }
}

struct DateState {
    file: File,
    period: String,
}

/// 날짜 기준 순환 파일
///
/// 패턴으로 포맷한 기간 문자열이 바뀌면 현재 파일을
/// `filename + 이전 기간` 이름으로 옮기고 새 파일을 엽니다.
pub struct DateFileAppender {
    path: PathBuf,
    pattern: String,
    state: Mutex<DateState>,
}

impl DateFileAppender {
    pub fn open<P: AsRef<Path>>(path: P, pattern: &str) -> LoggerResult<Self> {
        let path = path.as_ref().to_path_buf();
        let pattern = timefmt::to_chrono(pattern);
        let file = open_append(&path)?;

        // 기존 파일이면 마지막 수정 시각의 기간을 이어받음
        let modified = file
            .metadata()
            .and_then(|meta| meta.modified())
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| Local::now());
        let period = modified.format(&pattern).to_string();

        Ok(Self {
            path,
            pattern,
            state: Mutex::new(DateState { file, period }),
        })
    }

    fn roll(&self, state: &mut DateState, period: String) -> LoggerResult<()> {
        state.file.flush().map_err(|e| LoggerError::io(&self.path, e))?;

        let archived = with_suffix(&self.path, &state.period);
        fs::rename(&self.path, &archived).map_err(|e| LoggerError::io(&self.path, e))?;

        state.file = open_append(&self.path)?;

        debug!(
            path = %self.path.display(),
            archived = %archived.display(),
            "로그 파일 날짜 순환 완료"
        );

        state.period = period;
        Ok(())
    }
}

impl Appender for DateFileAppender {
    fn append(&self, record: &Record<'_>) -> LoggerResult<()> {
        let period = record.timestamp.format(&self.pattern).to_string();
        let mut line = record.layout();
        line.push('\n');

        let mut state = self.state.lock();
        if period != state.period {
            self.roll(&mut state, period)?;
        }

        state
            .file
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::io(&self.path, e))
    }
}

/// 색상이 적용된 콘솔 출력
pub struct ConsoleAppender;

impl Appender for ConsoleAppender {
    fn append(&self, record: &Record<'_>) -> LoggerResult<()> {
        writeln!(std::io::stdout().lock(), "{}", record.colored_layout()).map_err(LoggerError::Stream)
    }
}

/// 표준 출력에 레이아웃 그대로 기록
pub struct StdoutAppender;

impl Appender for StdoutAppender {
    fn append(&self, record: &Record<'_>) -> LoggerResult<()> {
        writeln!(std::io::stdout().lock(), "{}", record.layout()).map_err(LoggerError::Stream)
    }
}
