//! 로그 레벨
//!
//! 개별 레코드의 심각도(`LogLevel`)와 카테고리 임계값(`LevelThreshold`)을 정의합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoggerError;

/// 로그 레벨 열거형
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// 상세한 추적 정보
    Trace = 0,
    /// 디버깅 정보
    Debug = 1,
    /// 일반 정보
    Info = 2,
    /// 경고 상황
    Warn = 3,
    /// 오류 상황
    Error = 4,
    /// 시스템 중단 수준 오류
    Fatal = 5,
}

impl LogLevel {
    /// 대문자 레벨 이름 (`INFO`)
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// 소문자 레벨 이름 (`info`). 데코레이터 키와 JSON 출력에 사용
    pub fn as_lower(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

/// 카테고리 최소 레벨
///
/// `All`은 모든 레코드를, `Off`는 어떤 레코드도 통과시키지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelThreshold {
    All,
    At(LogLevel),
    Off,
}

impl LevelThreshold {
    /// 해당 레벨의 레코드를 기록해야 하는지 여부
    pub fn allows(&self, level: LogLevel) -> bool {
        match self {
            LevelThreshold::All => true,
            LevelThreshold::At(min) => level >= *min,
            LevelThreshold::Off => false,
        }
    }
}

impl FromStr for LevelThreshold {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALL" => Ok(LevelThreshold::All),
            "OFF" => Ok(LevelThreshold::Off),
            _ => s.parse().map(LevelThreshold::At),
        }
    }
}
