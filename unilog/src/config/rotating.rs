//! 순환 파일 로거 설정

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// 콘솔 transport 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleTransportConfig {
    /// panic을 로그로 남길지 여부
    pub handle_exceptions: bool,
    /// JSON 한 줄로 기록할지 여부
    pub json: bool,
    /// ANSI 색상 사용 여부
    pub colorize: bool,
    /// 호환성 필드 (타임스탬프는 항상 포맷 단계에서 붙음)
    pub timestamp: bool,
}

impl Default for ConsoleTransportConfig {
    fn default() -> Self {
        Self {
            handle_exceptions: true,
            json: false,
            colorize: true,
            timestamp: true,
        }
    }
}

/// 날짜 순환 파일 transport 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTransportConfig {
    pub handle_exceptions: bool,
    pub json: bool,
    pub colorize: bool,
    pub timestamp: bool,
    /// `%DATE%` 토큰이 날짜로 치환되는 파일 경로
    pub filename: String,
    pub date_pattern: String,
    /// 보관 파일 gzip 압축 여부
    pub zipped_archive: bool,
    /// `100m`, `10k`, `1g` 또는 바이트 수. 빈 문자열이면 크기 제한 없음
    #[serde(deserialize_with = "string_or_number")]
    pub max_size: String,
    /// `30d`(보관 일수) 또는 `14`(보관 파일 수). 빈 문자열이면 삭제하지 않음
    #[serde(deserialize_with = "string_or_number")]
    pub max_files: String,
}

impl Default for FileTransportConfig {
    fn default() -> Self {
        Self::in_dir("logs")
    }
}

impl FileTransportConfig {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            handle_exceptions: true,
            json: false,
            colorize: true,
            timestamp: true,
            filename: dir
                .as_ref()
                .join("app-%DATE%.log")
                .to_string_lossy()
                .into_owned(),
            date_pattern: "YYYY-MM-DD".to_string(),
            zipped_archive: true,
            max_size: "100m".to_string(),
            max_files: "30d".to_string(),
        }
    }
}

/// 포맷 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// 타임스탬프 패턴 (moment 스타일 토큰)
    pub timestamp: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            timestamp: "YYYY-MM-DD HH:mm:ss".to_string(),
        }
    }
}

/// 순환 파일 로거 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotatingLogOptions {
    pub console: ConsoleTransportConfig,
    pub file: FileTransportConfig,
    pub label: String,
    pub level: String,
    pub exit_on_error: bool,
    pub format: FormatConfig,
}

impl Default for RotatingLogOptions {
    fn default() -> Self {
        Self::in_dir("logs")
    }
}

impl RotatingLogOptions {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            console: ConsoleTransportConfig::default(),
            file: FileTransportConfig::in_dir(dir),
            label: "LOGGER".to_string(),
            level: "debug".to_string(),
            exit_on_error: false,
            format: FormatConfig::default(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let options = RotatingLogOptions::default();
        assert_eq!(options.label, "LOGGER");
        assert_eq!(options.level, "debug");
        assert!(!options.exit_on_error);
        assert!(options.console.colorize);
        assert!(options.file.filename.ends_with("app-%DATE%.log"));
        assert_eq!(options.file.max_size, "100m");
        assert_eq!(options.file.max_files, "30d");
        assert_eq!(options.format.timestamp, "YYYY-MM-DD HH:mm:ss");
    }

    #[test]
    fn test_numeric_limits_accepted() {
        let mut value = serde_json::to_value(RotatingLogOptions::default()).unwrap();
        value["file"]["maxSize"] = serde_json::json!(2048);
        value["file"]["maxFiles"] = serde_json::json!(14);

        let options: RotatingLogOptions = serde_json::from_value(value).unwrap();
        assert_eq!(options.file.max_size, "2048");
        assert_eq!(options.file.max_files, "14");
    }
}
