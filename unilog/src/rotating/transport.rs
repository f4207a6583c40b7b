//! 순환 파일 로거 transport
//!
//! 콘솔 transport와 날짜별 순환 파일 transport를 구현합니다.
//!
//! # 파일 순환 규칙
//! - 파일 이름의 `%DATE%`는 `datePattern`으로 포맷한 날짜로 치환
//! - 날짜가 바뀌면 새 파일을 열고, `zippedArchive`면 지난 날짜 파일을 gzip 압축
//! - 파일이 `maxSize`를 넘으면 `<파일>.<n>`으로 보관 (압축 시 `.gz` 추가)
//! - 순환 직후 `maxFiles` 보관 정책 적용
//! - 정책은 `<접두어><날짜><접미어>[.n][.gz]` 형식의 파일에만 적용
//! - `zippedArchive`면 열 때 압축되지 않은 지난 파일을 압축

use chrono::format::{self as chrono_format, Parsed, StrftimeItems};
use chrono::{DateTime, Local};
use flate2::write::GzEncoder;
use flate2::Compression;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

use crate::config::{ConsoleTransportConfig, FileTransportConfig};
use crate::error::{LoggerError, LoggerResult};
use crate::timefmt;

const DATE_TOKEN: &str = "%DATE%";

/// transport 출력 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportStyle {
    pub colorize: bool,
    pub json: bool,
}

/// 렌더링된 한 줄을 받는 출력 대상
pub trait Transport: Send + Sync {
    fn name(&self) -> &'static str;

    fn style(&self) -> TransportStyle;

    /// panic 메시지를 기록할지 여부
    fn handles_exceptions(&self) -> bool;

    fn write_line(&self, line: &str) -> LoggerResult<()>;
}

/// 표준 출력 transport
pub struct ConsoleTransport {
    style: TransportStyle,
    handle_exceptions: bool,
}

impl ConsoleTransport {
    pub fn new(config: &ConsoleTransportConfig) -> Self {
        Self {
            style: TransportStyle {
                colorize: config.colorize,
                json: config.json,
            },
            handle_exceptions: config.handle_exceptions,
        }
    }
}

impl Transport for ConsoleTransport {
    fn name(&self) -> &'static str {
        "console"
    }

    fn style(&self) -> TransportStyle {
        self.style
    }

    fn handles_exceptions(&self) -> bool {
        self.handle_exceptions
    }

    fn write_line(&self, line: &str) -> LoggerResult<()> {
        writeln!(io::stdout().lock(), "{}", line).map_err(LoggerError::Stream)
    }
}

/// 보관 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    Unlimited,
    /// 수정 시각 기준 보관 일수
    Days(u32),
    /// 현재 파일을 포함한 최대 파일 수
    Files(usize),
}

/// `100m`, `10k`, `1g`, `2048` 형식의 크기 파싱. 빈 값이나 0은 제한 없음
pub fn parse_size(value: &str) -> LoggerResult<Option<u64>> {
    let text = value.trim().to_ascii_lowercase();
    if text.is_empty() {
        return Ok(None);
    }

    let (digits, unit) = match text.char_indices().last() {
        Some((i, 'k')) => (&text[..i], 1024),
        Some((i, 'm')) => (&text[..i], 1024 * 1024),
        Some((i, 'g')) => (&text[..i], 1024 * 1024 * 1024),
        _ => (text.as_str(), 1),
    };

    let count: u64 = digits
        .trim()
        .parse()
        .map_err(|_| LoggerError::InvalidSize(value.to_string()))?;

    match count.checked_mul(unit) {
        Some(0) => Ok(None),
        Some(bytes) => Ok(Some(bytes)),
        None => Err(LoggerError::InvalidSize(value.to_string())),
    }
}

/// `30d`(일수) 또는 `14`(파일 수) 형식의 보관 정책 파싱
pub fn parse_retention(value: &str) -> LoggerResult<Retention> {
    let text = value.trim().to_ascii_lowercase();
    if text.is_empty() {
        return Ok(Retention::Unlimited);
    }

    let invalid = || LoggerError::InvalidRetention(value.to_string());
    match text.strip_suffix('d') {
        Some(days) => match days.trim().parse::<u32>() {
            Ok(days) if days > 0 => Ok(Retention::Days(days)),
            _ => Err(invalid()),
        },
        None => match text.parse::<usize>() {
            Ok(files) if files > 0 => Ok(Retention::Files(files)),
            _ => Err(invalid()),
        },
    }
}

struct ActiveFile {
    file: File,
    path: PathBuf,
    date: String,
    size: u64,
}

/// 날짜별 순환 파일 transport
pub struct DailyRotateFile {
    template: String,
    dir: PathBuf,
    /// 파일 이름에서 `%DATE%` 앞뒤 부분. 토큰이 없으면 `None`
    name_parts: (String, Option<String>),
    date_pattern: String,
    zipped_archive: bool,
    max_size: Option<u64>,
    retention: Retention,
    style: TransportStyle,
    handle_exceptions: bool,
    active: Mutex<Option<ActiveFile>>,
}

impl DailyRotateFile {
    /// 설정 검증 후 transport 생성
    ///
    /// 로그 디렉토리는 즉시 만들고, 파일은 첫 기록 시점에 엽니다.
    pub fn open(config: &FileTransportConfig) -> LoggerResult<Self> {
        let max_size = parse_size(&config.max_size)?;
        let retention = parse_retention(&config.max_files)?;

        let template = Path::new(&config.filename);
        let dir = template
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| LoggerError::io(&dir, e))?;
        let name = template
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name_parts = match name.split_once(DATE_TOKEN) {
            Some((prefix, suffix)) => (prefix.to_string(), Some(suffix.to_string())),
            None => (name.clone(), None),
        };

        let transport = Self {
            template: config.filename.clone(),
            dir,
            name_parts,
            date_pattern: timefmt::to_chrono(&config.date_pattern),
            zipped_archive: config.zipped_archive,
            max_size,
            retention,
            style: TransportStyle {
                colorize: config.colorize,
                json: config.json,
            },
            handle_exceptions: config.handle_exceptions,
            active: Mutex::new(None),
        };

        if transport.zipped_archive {
            let today = Local::now().format(&transport.date_pattern).to_string();
            transport.compress_leftovers(&transport.path_for(&today));
        }

        Ok(transport)
    }

    /// 지정 시각 기준으로 한 줄 기록
    pub fn write_at(&self, now: DateTime<Local>, line: &str) -> LoggerResult<()> {
        let date = now.format(&self.date_pattern).to_string();
        let mut bytes = line.as_bytes().to_vec();
        bytes.push(b'\n');
        let len = bytes.len() as u64;

        let mut guard = self.active.lock();
        let rotated = match guard.take() {
            Some(active) if active.date != date => {
                self.archive_day(active)?;
                *guard = Some(self.open_for(&date)?);
                true
            }
            Some(mut active) => {
                let overflow = self
                    .max_size
                    .is_some_and(|max| active.size > 0 && active.size + len > max);
                if overflow {
                    self.archive_overflow(&mut active)?;
                }
                *guard = Some(active);
                overflow
            }
            None => {
                *guard = Some(self.open_for(&date)?);
                false
            }
        };

        let active = guard
            .as_mut()
            .ok_or(LoggerError::BackendUnavailable("file transport"))?;
        active
            .file
            .write_all(&bytes)
            .map_err(|e| LoggerError::io(&active.path, e))?;
        active.size += len;

        let current = rotated.then(|| active.path.clone());
        drop(guard);

        if let Some(current) = current {
            self.apply_retention(&current);
        }

        Ok(())
    }

    /// 현재 날짜 파일의 경로
    pub fn path_for(&self, date: &str) -> PathBuf {
        PathBuf::from(self.template.replace(DATE_TOKEN, date))
    }

    fn open_for(&self, date: &str) -> LoggerResult<ActiveFile> {
        let path = self.path_for(date);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::io(&path, e))?;
        let size = file.metadata().map_err(|e| LoggerError::io(&path, e))?.len();

        debug!(path = %path.display(), "순환 로그 파일 열림");
        Ok(ActiveFile {
            file,
            path,
            date: date.to_string(),
            size,
        })
    }

    fn archive_day(&self, mut active: ActiveFile) -> LoggerResult<()> {
        active
            .file
            .flush()
            .map_err(|e| LoggerError::io(&active.path, e))?;
        let path = active.path.clone();
        drop(active);

        if self.zipped_archive {
            gzip_file(&path, &with_suffix(&path, ".gz"))?;
        }

        debug!(path = %path.display(), zipped = self.zipped_archive, "날짜 변경으로 로그 파일 순환");
        Ok(())
    }

    fn archive_overflow(&self, active: &mut ActiveFile) -> LoggerResult<()> {
        active
            .file
            .flush()
            .map_err(|e| LoggerError::io(&active.path, e))?;

        let index = (1..)
            .find(|n| {
                let plain = with_suffix(&active.path, &format!(".{}", n));
                !plain.exists() && !with_suffix(&plain, ".gz").exists()
            })
            .unwrap_or(1);
        let archived = with_suffix(&active.path, &format!(".{}", index));

        if self.zipped_archive {
            gzip_file(&active.path, &with_suffix(&archived, ".gz"))?;
        } else {
            fs::rename(&active.path, &archived).map_err(|e| LoggerError::io(&active.path, e))?;
        }

        active.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&active.path)
            .map_err(|e| LoggerError::io(&active.path, e))?;
        active.size = 0;

        debug!(
            path = %active.path.display(),
            archived = %archived.display(),
            "크기 초과로 로그 파일 순환"
        );
        Ok(())
    }

    /// 이전 실행에서 남은 압축되지 않은 파일 압축. 실패는 경고만 남김
    fn compress_leftovers(&self, today: &Path) {
        let files = match self.managed_files(today) {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "로그 디렉토리 읽기 실패, 이전 파일 압축 건너뜀");
                return;
            }
        };

        for (_, path) in files {
            if path.extension().is_some_and(|ext| ext == "gz") {
                continue;
            }

            let target = with_suffix(&path, ".gz");
            if target.exists() {
                warn!(path = %target.display(), "압축 파일이 이미 있어 건너뜀");
                continue;
            }

            match gzip_file(&path, &target) {
                Ok(()) => debug!(path = %path.display(), "이전 로그 파일 압축"),
                Err(e) => warn!(path = %path.display(), error = %e, "이전 로그 파일 압축 실패"),
            }
        }
    }

    /// 보관 정책을 넘는 파일 삭제. 실패는 경고만 남김
    fn apply_retention(&self, active: &Path) {
        let files = match self.managed_files(active) {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "로그 디렉토리 읽기 실패, 보관 정책 건너뜀");
                return;
            }
        };

        let expired: Vec<PathBuf> = match self.retention {
            Retention::Unlimited => Vec::new(),
            Retention::Days(days) => {
                let cutoff = SystemTime::now()
                    .checked_sub(Duration::from_secs(u64::from(days) * 24 * 60 * 60))
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                files
                    .into_iter()
                    .filter(|(modified, _)| *modified < cutoff)
                    .map(|(_, path)| path)
                    .collect()
            }
            Retention::Files(count) => files
                .into_iter()
                .skip(count.saturating_sub(1))
                .map(|(_, path)| path)
                .collect(),
        };

        let mut deleted_count = 0;
        for path in expired {
            match fs::remove_file(&path) {
                Ok(()) => deleted_count += 1,
                Err(e) => warn!(path = %path.display(), error = %e, "로그 파일 삭제 실패"),
            }
        }

        if deleted_count > 0 {
            debug!(deleted_files = deleted_count, "보관 정책에 따라 로그 파일 정리 완료");
        }
    }

    /// 현재 파일을 제외한 관리 대상 파일 목록 (최신순)
    fn managed_files(&self, active: &Path) -> io::Result<Vec<(SystemTime, PathBuf)>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();

            if path == active || !path.is_file() {
                continue;
            }
            if !self.is_managed_name(&entry.file_name().to_string_lossy()) {
                continue;
            }

            let modified = entry.metadata()?.modified()?;
            files.push((modified, path));
        }

        files.sort_by(|a, b| b.cmp(a));
        Ok(files)
    }

    /// `<접두어><날짜><접미어>[.n][.gz]` 형식의 파일 이름인지 검사
    fn is_managed_name(&self, file_name: &str) -> bool {
        let (prefix, suffix) = &self.name_parts;
        let Some(rest) = file_name.strip_prefix(prefix.as_str()) else {
            return false;
        };
        let rest = rest.strip_suffix(".gz").unwrap_or(rest);

        [Some(rest), strip_index(rest)]
            .into_iter()
            .flatten()
            .any(|stem| match suffix {
                Some(suffix) => stem
                    .strip_suffix(suffix.as_str())
                    .is_some_and(|date| self.is_date(date)),
                None => stem.is_empty(),
            })
    }

    /// `datePattern`으로 읽을 수 있는 날짜 문자열인지 검사
    fn is_date(&self, text: &str) -> bool {
        let mut parsed = Parsed::new();
        !text.is_empty()
            && chrono_format::parse(&mut parsed, text, StrftimeItems::new(&self.date_pattern)).is_ok()
    }
}

impl Transport for DailyRotateFile {
    fn name(&self) -> &'static str {
        "file"
    }

    fn style(&self) -> TransportStyle {
        self.style
    }

    fn handles_exceptions(&self) -> bool {
        self.handle_exceptions
    }

    fn write_line(&self, line: &str) -> LoggerResult<()> {
        self.write_at(Local::now(), line)
    }
}

/// `name.<숫자>`의 `name` 부분
fn strip_index(name: &str) -> Option<&str> {
    let (stem, index) = name.rsplit_once('.')?;
    (!index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())).then_some(stem)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// `source`를 gzip으로 압축해 `target`에 쓰고 원본 삭제
fn gzip_file(source: &Path, target: &Path) -> LoggerResult<()> {
    let mut input = File::open(source).map_err(|e| LoggerError::io(source, e))?;
    let output = File::create(target).map_err(|e| LoggerError::io(target, e))?;

    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder).map_err(|e| LoggerError::io(target, e))?;
    encoder.finish().map_err(|e| LoggerError::io(target, e))?;

    fs::remove_file(source).map_err(|e| LoggerError::io(source, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    fn config(dir: &Path, max_size: &str, max_files: &str, zipped: bool) -> FileTransportConfig {
        FileTransportConfig {
            max_size: max_size.to_string(),
            max_files: max_files.to_string(),
            zipped_archive: zipped,
            ..FileTransportConfig::in_dir(dir)
        }
    }

    fn day(d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2030, 1, d, 12, 0, 0).unwrap()
    }

    fn gunzip(path: &Path) -> String {
        let mut decoder = GzDecoder::new(File::open(path).expect("Test assertion failed"));
        let mut content = String::new();
        decoder
            .read_to_string(&mut content)
            .expect("Test assertion failed");
        content
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("100m").unwrap(), Some(100 * 1024 * 1024));
        assert_eq!(parse_size("10K").unwrap(), Some(10 * 1024));
        assert_eq!(parse_size("1g").unwrap(), Some(1024 * 1024 * 1024));
        assert_eq!(parse_size("2048").unwrap(), Some(2048));
        assert_eq!(parse_size("").unwrap(), None);
        assert!(matches!(parse_size("huge"), Err(LoggerError::InvalidSize(_))));
    }

    #[test]
    fn test_parse_retention() {
        assert_eq!(parse_retention("30d").unwrap(), Retention::Days(30));
        assert_eq!(parse_retention("14").unwrap(), Retention::Files(14));
        assert_eq!(parse_retention("").unwrap(), Retention::Unlimited);
        assert!(matches!(
            parse_retention("0"),
            Err(LoggerError::InvalidRetention(_))
        ));
        assert!(matches!(
            parse_retention("weekly"),
            Err(LoggerError::InvalidRetention(_))
        ));
    }

    #[test]
    fn test_date_change_gzips_previous_day() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let transport =
            DailyRotateFile::open(&config(temp_dir.path(), "100m", "", true)).expect("Test assertion failed");

        transport.write_at(day(1), "day one").expect("Test assertion failed");
        transport.write_at(day(2), "day two").expect("Test assertion failed");

        let first = temp_dir.path().join("app-2030-01-01.log");
        assert!(!first.exists());
        assert!(gunzip(&with_suffix(&first, ".gz")).contains("day one"));

        let second = fs::read_to_string(temp_dir.path().join("app-2030-01-02.log"))
            .expect("Test assertion failed");
        assert_eq!(second, "day two\n");
    }

    #[test]
    fn test_size_overflow_archives_numbered_file() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let transport =
            DailyRotateFile::open(&config(temp_dir.path(), "16", "", false)).expect("Test assertion failed");

        transport.write_at(day(1), "0123456789").expect("Test assertion failed");
        transport.write_at(day(1), "abcdefghij").expect("Test assertion failed");
        transport.write_at(day(1), "ABCDEFGHIJ").expect("Test assertion failed");

        let active = temp_dir.path().join("app-2030-01-01.log");
        assert_eq!(
            fs::read_to_string(with_suffix(&active, ".1")).expect("Test assertion failed"),
            "0123456789\n"
        );
        assert_eq!(
            fs::read_to_string(with_suffix(&active, ".2")).expect("Test assertion failed"),
            "abcdefghij\n"
        );
        assert_eq!(
            fs::read_to_string(&active).expect("Test assertion failed"),
            "ABCDEFGHIJ\n"
        );
    }

    #[test]
    fn test_file_count_retention() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let transport =
            DailyRotateFile::open(&config(temp_dir.path(), "", "2", true)).expect("Test assertion failed");

        transport.write_at(day(1), "day one").expect("Test assertion failed");
        transport.write_at(day(2), "day two").expect("Test assertion failed");
        transport.write_at(day(3), "day three").expect("Test assertion failed");
        transport.write_at(day(4), "day four").expect("Test assertion failed");

        let mut archives: Vec<String> = fs::read_dir(temp_dir.path())
            .expect("Test assertion failed")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".gz"))
            .collect();
        archives.sort();

        assert_eq!(archives, vec!["app-2030-01-03.log.gz".to_string()]);
        assert!(temp_dir.path().join("app-2030-01-04.log").exists());
        assert!(gunzip(&temp_dir.path().join("app-2030-01-03.log.gz")).contains("day three"));
    }

    #[test]
    fn test_day_retention_removes_stale_files() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let stale = temp_dir.path().join("app-2000-01-01.log.gz");
        let unrelated = temp_dir.path().join("other.log");
        fs::write(&stale, b"old").expect("Test assertion failed");
        fs::write(&unrelated, b"keep").expect("Test assertion failed");

        let long_ago = SystemTime::now() - Duration::from_secs(90 * 24 * 60 * 60);
        File::options()
            .write(true)
            .open(&stale)
            .and_then(|file| file.set_modified(long_ago))
            .expect("Test assertion failed");

        let transport =
            DailyRotateFile::open(&config(temp_dir.path(), "", "30d", true)).expect("Test assertion failed");
        transport.write_at(day(1), "day one").expect("Test assertion failed");
        transport.write_at(day(2), "day two").expect("Test assertion failed");

        assert!(!stale.exists());
        assert!(unrelated.exists());
        assert!(temp_dir.path().join("app-2030-01-01.log.gz").exists());
    }

    #[test]
    fn test_retention_skips_foreign_files() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let foreign = ["system.log", "access.log", "error.log", "notes-2030-01-01.log"];
        for name in foreign {
            fs::write(temp_dir.path().join(name), b"keep").expect("Test assertion failed");
        }

        let mut config = config(temp_dir.path(), "", "2", true);
        config.filename = temp_dir.path().join("%DATE%.log").to_string_lossy().into_owned();
        let transport = DailyRotateFile::open(&config).expect("Test assertion failed");

        for d in 1..=4 {
            transport.write_at(day(d), "line").expect("Test assertion failed");
        }

        for name in foreign {
            let path = temp_dir.path().join(name);
            assert_eq!(fs::read_to_string(&path).expect("Test assertion failed"), "keep");
        }
        assert!(temp_dir.path().join("2030-01-03.log.gz").exists());
        assert!(temp_dir.path().join("2030-01-04.log").exists());
        assert!(!temp_dir.path().join("2030-01-02.log.gz").exists());
    }

    #[test]
    fn test_managed_name_matching() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let transport =
            DailyRotateFile::open(&config(temp_dir.path(), "", "", false)).expect("Test assertion failed");

        assert!(transport.is_managed_name("app-2030-01-01.log"));
        assert!(transport.is_managed_name("app-2030-01-01.log.gz"));
        assert!(transport.is_managed_name("app-2030-01-01.log.3"));
        assert!(transport.is_managed_name("app-2030-01-01.log.3.gz"));
        assert!(!transport.is_managed_name("app-latest.log"));
        assert!(!transport.is_managed_name("app-2030-01-01.log.bak"));
        assert!(!transport.is_managed_name("system.log"));
    }

    #[test]
    fn test_open_compresses_leftover_days() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        let leftover = temp_dir.path().join("app-2000-01-01.log");
        let overflow = temp_dir.path().join("app-2000-01-01.log.1");
        let unrelated = temp_dir.path().join("system.log");
        fs::write(&leftover, b"yesterday\n").expect("Test assertion failed");
        fs::write(&overflow, b"overflow\n").expect("Test assertion failed");
        fs::write(&unrelated, b"keep").expect("Test assertion failed");

        let today = Local::now().format("%Y-%m-%d").to_string();
        let active = temp_dir.path().join(format!("app-{}.log", today));
        fs::write(&active, b"today\n").expect("Test assertion failed");

        let _transport =
            DailyRotateFile::open(&config(temp_dir.path(), "", "", true)).expect("Test assertion failed");

        assert!(!leftover.exists());
        assert_eq!(gunzip(&with_suffix(&leftover, ".gz")), "yesterday\n");
        assert!(!overflow.exists());
        assert_eq!(gunzip(&with_suffix(&overflow, ".gz")), "overflow\n");
        // 오늘 파일과 관리 대상이 아닌 파일은 그대로
        assert_eq!(fs::read_to_string(&active).expect("Test assertion failed"), "today\n");
        assert!(unrelated.exists());
    }

    #[test]
    fn test_invalid_limits_fail_open() {
        let temp_dir = TempDir::new().expect("Test assertion failed");
        assert!(matches!(
            DailyRotateFile::open(&config(temp_dir.path(), "lots", "30d", true)),
            Err(LoggerError::InvalidSize(_))
        ));
        assert!(matches!(
            DailyRotateFile::open(&config(temp_dir.path(), "1m", "forever", true)),
            Err(LoggerError::InvalidRetention(_))
        ));
    }
}
