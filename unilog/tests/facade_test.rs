//! Facade 통합 테스트
//!
//! 설정 병합, 백엔드 조립, 실패 격리를 Facade 표면에서 검증합니다.

use anyhow::Result;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use unilog::config::{LoggerOptions, RotatingLogOptions};
use unilog::{create_logger, HostConfig, LineFormat, LogLevel, LoggerBuilder, LoggerState};

fn today_log(dir: &Path) -> PathBuf {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    dir.join(format!("app-{}.log", today))
}

/// 메시지만 기록하는 로거 (파일 내용 검증용)
fn message_only(dir: &Path) -> LoggerBuilder {
    LoggerBuilder::new()
        .log_dir(dir)
        .formatter(LineFormat::custom(|parts| parts.message.to_string()))
}

#[derive(Debug)]
#[allow(dead_code)]
struct Point {
    x: i32,
    y: i32,
}

/// 기본 설정 Facade 생성 테스트
#[test]
fn test_default_facade_is_ready() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let logger = LoggerBuilder::new().log_dir(temp_dir.path()).build();

    assert_eq!(logger.state(), LoggerState::Ready);
    assert_eq!(logger.options(), &LoggerOptions::in_dir(temp_dir.path()));

    logger.info(&[&"info"]);
    logger.warn(&[&"warn"]);
    logger.error(&[&"error"]);
    logger.debug(&[&"debug"]);

    let line = logger.format_line(LogLevel::Info, "hello");
    assert!(line.contains("LOGGER"));
    assert!(line.contains("INFO"));
    assert!(line.contains("hello"));

    Ok(())
}

/// 인자 없는 호출 테스트
#[test]
fn test_empty_calls_return_normally() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let logger = message_only(temp_dir.path()).build();

    logger.info(&[]);
    logger.warn(&[]);
    logger.error(&[]);
    logger.debug(&[]);
    logger.write(&[]);
    logger.trace("", "system");
    logger.noop(());
    logger.noop("ignored");

    // 파일 transport는 첫 기록 시점에 파일을 엶
    assert!(!today_log(temp_dir.path()).exists());

    Ok(())
}

/// 값마다 한 줄씩 순서대로 기록되는지 테스트
#[test]
fn test_mixed_values_one_line_each() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let logger = message_only(temp_dir.path()).build();

    logger.info(&[&"text", &42, &vec![1, 2], &Point { x: 1, y: 2 }]);
    logger.write(&[&String::from("via write")]);

    let content = std::fs::read_to_string(today_log(temp_dir.path()))?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec!["text", "42", "[1, 2]", "Point { x: 1, y: 2 }", "via write"]
    );

    Ok(())
}

/// 레벨 필터 테스트
#[test]
fn test_rotating_level_filters_facade_calls() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let logger = message_only(temp_dir.path())
        .config(&json!({ "rotatingLog": { "level": "warn" } }))
        .build();

    logger.debug(&[&"hidden debug"]);
    logger.info(&[&"hidden info"]);
    logger.warn(&[&"shown warn"]);
    logger.error(&[&"shown error"]);

    let content = std::fs::read_to_string(today_log(temp_dir.path()))?;
    assert_eq!(content, "shown warn\nshown error\n");

    Ok(())
}

/// trace 카테고리 처리 테스트
#[test]
fn test_trace_categories() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let logger = LoggerBuilder::new().log_dir(temp_dir.path()).build();

    logger.trace("cache warmed", "system");
    logger.trace_system("second trace");
    // 빈 카테고리는 표준 에러로만 보고
    logger.trace("lost", "");
    // 알 수 없는 카테고리는 콘솔로 대체
    logger.trace("to console", "billing");

    let content = std::fs::read_to_string(temp_dir.path().join("system.log"))?;
    assert!(content.contains("[TRACE] system - cache warmed"));
    assert!(content.contains("[TRACE] system - second trace"));
    assert!(!content.contains("lost"));
    assert!(!content.contains("to console"));

    Ok(())
}

/// 부분 override 병합 테스트
#[test]
fn test_partial_override_keeps_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let logger = LoggerBuilder::new()
        .log_dir(temp_dir.path())
        .config(&json!({ "rotatingLog": { "level": "error" } }))
        .build();

    let defaults = RotatingLogOptions::in_dir(temp_dir.path());
    let merged = &logger.options().rotating_log;

    assert_eq!(merged.level, "error");
    assert_eq!(merged.exit_on_error, defaults.exit_on_error);
    assert_eq!(merged.console, defaults.console);
    assert_eq!(merged.file, defaults.file);
    assert_eq!(merged.label, defaults.label);
    assert_eq!(logger.state(), LoggerState::Ready);

    Ok(())
}

/// 이전 네임스페이스 이름 지원 테스트
#[test]
fn test_legacy_namespace_names() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let logger = LoggerBuilder::new()
        .log_dir(temp_dir.path())
        .config(&json!({
            "winston": { "label": "LEGACY" },
            "morgan": { "immediate": false },
            "log4js": { "categories": { "system": { "level": "ERROR" } } }
        }))
        .build();

    assert_eq!(logger.options().rotating_log.label, "LEGACY");
    assert!(!logger.options().access_log.immediate);
    assert_eq!(logger.options().structured_log.categories["system"].level, "ERROR");
    assert!(logger.format_line(LogLevel::Info, "x").contains("LEGACY"));

    Ok(())
}

/// 존재하지 않는 appender 참조 시 Degraded 테스트
#[test]
fn test_unknown_appender_degrades() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let logger = LoggerBuilder::new()
        .log_dir(temp_dir.path())
        .config(&json!({
            "structuredLog": {
                "categories": { "audit": { "appenders": ["ghost"], "level": "INFO" } }
            }
        }))
        .build();

    assert_eq!(logger.state(), LoggerState::Degraded);
    assert!(logger.structured().is_none());
    assert!(logger.rotating().is_none());

    // Degraded 상태에서도 모든 호출은 정상 반환
    logger.info(&[&"still works"]);
    logger.trace("console trace", "system");
    assert_eq!(logger.format_line(LogLevel::Error, "boom"), "[ERROR] boom");

    Ok(())
}

/// 스키마에 맞지 않는 override는 해당 네임스페이스만 무시
#[test]
fn test_invalid_namespace_override_is_dropped() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let logger = LoggerBuilder::new()
        .log_dir(temp_dir.path())
        .config(&json!({
            "rotatingLog": { "exitOnError": "sometimes" },
            "accessLog": { "format": ":method :url" }
        }))
        .build();

    assert_eq!(
        logger.options().rotating_log,
        RotatingLogOptions::in_dir(temp_dir.path())
    );
    assert_eq!(logger.options().access_log.format, ":method :url");
    assert_eq!(logger.state(), LoggerState::Ready);

    Ok(())
}

/// 순환 파일 보관 정책은 같은 디렉토리의 구조화 로그 파일을 건드리지 않음
#[test]
fn test_rotating_retention_keeps_structured_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let filename = temp_dir.path().join("%DATE%.log");
    let logger = LoggerBuilder::new()
        .log_dir(temp_dir.path())
        .config(&json!({
            "rotatingLog": {
                "console": { "handleExceptions": false },
                "file": {
                    "filename": filename.to_string_lossy(),
                    "maxSize": "200",
                    "maxFiles": "2",
                    "handleExceptions": false
                }
            }
        }))
        .build();
    assert_eq!(logger.state(), LoggerState::Ready);

    logger.trace_system("before rotation");
    for i in 0..40 {
        logger.info(&[&format!("rotating line {}", i)]);
    }

    let system_log = temp_dir.path().join("system.log");
    assert!(system_log.exists());
    assert!(std::fs::read_to_string(&system_log)?.contains("before rotation"));

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let archives = std::fs::read_dir(temp_dir.path())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(&today) && name != &format!("{}.log", today))
        .count();
    assert_eq!(archives, 1);

    Ok(())
}

/// 사용자 정의 포맷 함수가 panic해도 같은 호출의 다음 값은 기록됨
#[test]
fn test_panicking_formatter_keeps_later_values() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let logger = LoggerBuilder::new()
        .log_dir(temp_dir.path())
        .config(&json!({
            "rotatingLog": {
                "console": { "handleExceptions": false },
                "file": { "colorize": false, "handleExceptions": false }
            }
        }))
        .formatter(LineFormat::custom(|parts| {
            if parts.message.contains("bad") {
                panic!("formatter bug");
            }
            parts.message.to_string()
        }))
        .build();

    logger.info(&[&"bad", &"after"]);
    logger.warn(&[&"next call"]);

    let content = std::fs::read_to_string(today_log(temp_dir.path()))?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("[LOGGER: INFO]"));
    assert!(lines[0].ends_with("bad"));
    assert_eq!(&lines[1..], &["after", "next call"]);

    Ok(())
}

/// 호스트 설정 파일로 생성 테스트
#[test]
fn test_create_logger_from_host_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("default.json");
    std::fs::write(
        &config_path,
        r#"{ "name": "demo", "logger": { "rotatingLog": { "label": "HOST" } } }"#,
    )?;

    let host = HostConfig::from_file(&config_path)?.with_log_dir(temp_dir.path().join("logs"));
    let logger = create_logger(&host);

    assert_eq!(logger.state(), LoggerState::Ready);
    assert_eq!(logger.options().rotating_log.label, "HOST");

    logger.error(&[&"written"]);
    assert!(today_log(&temp_dir.path().join("logs")).exists());

    Ok(())
}
