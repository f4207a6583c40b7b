//! 설정 병합
//!
//! 기본 설정 트리 위에 호출자가 준 부분 설정을 네임스페이스별로 깊게 병합합니다.
//!
//! # 규칙
//! - 기본 트리는 복제되며 절대 변경되지 않음
//! - `null`은 "값 없음"으로 취급되어 어느 깊이에서든 기본값을 덮어쓰지 않음
//! - 객체는 키 단위로 재귀 병합, 배열과 스칼라는 통째로 교체
//! - 객체가 아닌 override는 무시 (검증보다 가용성 우선)

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::LoggerOptions;

/// 구조화 로그 네임스페이스 키 (`log4js`는 이전 이름)
pub const STRUCTURED_LOG_KEY: (&str, &str) = ("structuredLog", "log4js");
/// 순환 파일 로그 네임스페이스 키 (`winston`은 이전 이름)
pub const ROTATING_LOG_KEY: (&str, &str) = ("rotatingLog", "winston");
/// access log 네임스페이스 키 (`morgan`은 이전 이름)
pub const ACCESS_LOG_KEY: (&str, &str) = ("accessLog", "morgan");

/// 네임스페이스 하나를 병합한 새 트리 반환
pub fn merge_namespace(default: &Value, overrides: Option<&Value>) -> Value {
    let mut merged = default.clone();

    if let (Value::Object(target), Some(Value::Object(source))) = (&mut merged, overrides) {
        merge_object(target, source);
    }

    merged
}

fn merge_object(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        if value.is_null() {
            continue;
        }

        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_object(existing, incoming);
            }
            (_, Value::Object(incoming)) => {
                let mut fresh = Map::new();
                merge_object(&mut fresh, incoming);
                target.insert(key.clone(), Value::Object(fresh));
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// `logger` 섹션을 세 네임스페이스 각각에 독립적으로 병합
pub fn merge_options(defaults: &LoggerOptions, overrides: Option<&Value>) -> LoggerOptions {
    LoggerOptions {
        structured_log: merge_typed(
            &defaults.structured_log,
            STRUCTURED_LOG_KEY.0,
            namespace(overrides, STRUCTURED_LOG_KEY),
        ),
        rotating_log: merge_typed(
            &defaults.rotating_log,
            ROTATING_LOG_KEY.0,
            namespace(overrides, ROTATING_LOG_KEY),
        ),
        access_log: merge_typed(
            &defaults.access_log,
            ACCESS_LOG_KEY.0,
            namespace(overrides, ACCESS_LOG_KEY),
        ),
    }
}

fn namespace<'a>(overrides: Option<&'a Value>, (key, legacy): (&str, &str)) -> Option<&'a Value> {
    let section = overrides?.as_object()?;
    section
        .get(key)
        .filter(|value| !value.is_null())
        .or_else(|| section.get(legacy))
}

/// 병합 결과가 스키마에 맞지 않으면 해당 네임스페이스만 기본값 유지
fn merge_typed<T>(default: &T, name: &str, overrides: Option<&Value>) -> T
where
    T: Serialize + DeserializeOwned + Clone,
{
    let Some(overrides) = overrides else {
        return default.clone();
    };

    let base = match serde_json::to_value(default) {
        Ok(base) => base,
        Err(e) => {
            warn!(namespace = name, error = %e, "기본 설정 직렬화 실패, override 무시");
            return default.clone();
        }
    };

    match serde_json::from_value(merge_namespace(&base, Some(overrides))) {
        Ok(merged) => {
            debug!(namespace = name, "설정 override 병합 완료");
            merged
        }
        Err(e) => {
            warn!(
                namespace = name,
                error = %e,
                "병합된 설정이 스키마와 맞지 않아 기본값 유지"
            );
            default.clone()
        }
    }
}
