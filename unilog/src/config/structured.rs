//! 구조화 로그(카테고리/appender) 설정

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{LoggerError, LoggerResult};
use crate::level::LevelThreshold;

/// 기본 카테고리 이름
pub const DEFAULT_CATEGORY: &str = "default";

fn default_backups() -> u32 {
    5
}

fn default_date_pattern() -> String {
    ".yyyy-MM-dd".to_string()
}

/// appender(출력 대상) 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AppenderConfig {
    /// 크기 기준으로 순환하는 파일
    File {
        filename: String,
        /// 0이면 순환하지 않음
        #[serde(rename = "maxLogSize", default)]
        max_log_size: u64,
        #[serde(default = "default_backups")]
        backups: u32,
    },
    /// 날짜 기준으로 순환하는 파일
    DateFile {
        filename: String,
        #[serde(default = "default_date_pattern")]
        pattern: String,
    },
    /// 색상이 적용된 콘솔 출력
    Console,
    /// 표준 출력에 그대로 기록
    Stdout,
}

/// 카테고리 설정: 최소 레벨과 순서 있는 appender 목록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub appenders: Vec<String>,
    pub level: String,
}

impl CategoryConfig {
    fn new(appenders: &[&str], level: &str) -> Self {
        Self {
            appenders: appenders.iter().map(|name| name.to_string()).collect(),
            level: level.to_string(),
        }
    }
}

/// 구조화 로그 백엔드 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredLogOptions {
    pub appenders: BTreeMap<String, AppenderConfig>,
    pub categories: BTreeMap<String, CategoryConfig>,
    /// 호환성을 위해 유지하는 플래그 (동작에 영향 없음)
    #[serde(default)]
    pub replace_console: bool,
}

impl Default for StructuredLogOptions {
    fn default() -> Self {
        Self::in_dir("logs")
    }
}

impl StructuredLogOptions {
    /// `dir` 아래에 로그 파일을 두는 기본 설정
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let file = |name: &str| dir.join(name).to_string_lossy().into_owned();

        let mut appenders = BTreeMap::new();
        appenders.insert(
            "system".to_string(),
            AppenderConfig::File {
                filename: file("system.log"),
                max_log_size: 1_048_576, // 1MiB
                backups: 3,
            },
        );
        appenders.insert(
            "access".to_string(),
            AppenderConfig::DateFile {
                filename: file("access.log"),
                pattern: "-yyyy-MM-dd".to_string(),
            },
        );
        appenders.insert(
            "error".to_string(),
            AppenderConfig::DateFile {
                filename: file("error.log"),
                pattern: "-yyyy-MM-dd".to_string(),
            },
        );
        appenders.insert("console".to_string(), AppenderConfig::Console);
        appenders.insert("stdout".to_string(), AppenderConfig::Stdout);

        let mut categories = BTreeMap::new();
        categories.insert(
            DEFAULT_CATEGORY.to_string(),
            CategoryConfig::new(&["access", "console", "stdout"], "INFO"),
        );
        categories.insert(
            "access".to_string(),
            CategoryConfig::new(&["access", "console", "stdout"], "INFO"),
        );
        categories.insert(
            "system".to_string(),
            CategoryConfig::new(&["system", "console", "stdout"], "ALL"),
        );
        categories.insert(
            "error".to_string(),
            CategoryConfig::new(&["error", "console", "stdout"], "WARN"),
        );

        Self {
            appenders,
            categories,
            replace_console: true,
        }
    }

    /// 카테고리/appender 참조 무결성 검증
    pub fn validate(&self) -> LoggerResult<()> {
        if !self.categories.contains_key(DEFAULT_CATEGORY) {
            return Err(LoggerError::MissingDefaultCategory);
        }

        for (name, category) in &self.categories {
            if category.appenders.is_empty() {
                return Err(LoggerError::EmptyCategory(name.clone()));
            }

            for appender in &category.appenders {
                if !self.appenders.contains_key(appender) {
                    return Err(LoggerError::UnknownAppender {
                        category: name.clone(),
                        appender: appender.clone(),
                    });
                }
            }

            category.level.parse::<LevelThreshold>()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let options = StructuredLogOptions::default();
        assert!(options.validate().is_ok());

        match &options.appenders["system"] {
            AppenderConfig::File {
                filename,
                max_log_size,
                backups,
            } => {
                assert!(filename.ends_with("system.log"));
                assert_eq!(*max_log_size, 1_048_576);
                assert_eq!(*backups, 3);
            }
            other => panic!("unexpected appender: {:?}", other),
        }
        assert_eq!(options.categories["system"].level, "ALL");
        assert_eq!(options.categories["error"].appenders[0], "error");
    }

    #[test]
    fn test_validate_unknown_appender() {
        let mut options = StructuredLogOptions::default();
        options
            .categories
            .insert("audit".to_string(), CategoryConfig::new(&["nowhere"], "INFO"));

        assert!(matches!(
            options.validate(),
            Err(LoggerError::UnknownAppender { .. })
        ));
    }

    #[test]
    fn test_validate_default_and_level() {
        let mut options = StructuredLogOptions::default();
        options.categories.remove(DEFAULT_CATEGORY);
        assert!(matches!(
            options.validate(),
            Err(LoggerError::MissingDefaultCategory)
        ));

        let mut options = StructuredLogOptions::default();
        options.categories.get_mut("system").unwrap().level = "LOUD".to_string();
        assert!(matches!(options.validate(), Err(LoggerError::InvalidLevel(_))));
    }

    #[test]
    fn test_serde_shape() {
        let value = serde_json::to_value(StructuredLogOptions::default()).unwrap();
        assert_eq!(value["appenders"]["system"]["type"], "file");
        assert_eq!(value["appenders"]["system"]["maxLogSize"], 1_048_576);
        assert_eq!(value["appenders"]["access"]["type"], "dateFile");
        assert_eq!(value["appenders"]["console"]["type"], "console");
        assert_eq!(value["replaceConsole"], true);
    }
}
