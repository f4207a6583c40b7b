//! 순환 파일 로거 라인 포맷
//!
//! 레이블 → 타임스탬프 → 출력 포맷 순서로 한 줄을 만듭니다.

use serde_json::json;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::decorator::decorate;
use crate::level::LogLevel;

/// 포맷 단계에 전달되는 라인 구성 요소
#[derive(Debug, Clone, Copy)]
pub struct LineParts<'a> {
    pub level: LogLevel,
    pub label: &'a str,
    pub timestamp: &'a str,
    pub message: &'a str,
}

/// 사용자 정의 포맷 함수
pub type FormatFn = Arc<dyn Fn(&LineParts<'_>) -> String + Send + Sync>;

thread_local! {
    static IN_CUSTOM_FORMAT: Cell<bool> = const { Cell::new(false) };
}

/// 현재 스레드가 사용자 정의 포맷 함수를 실행 중인지 여부
///
/// panic hook은 이 구간의 panic을 로그 레코드로 남기지 않습니다.
pub(crate) fn in_custom_format() -> bool {
    IN_CUSTOM_FORMAT.with(Cell::get)
}

/// 라인 포맷 선택
#[derive(Clone, Default)]
pub enum LineFormat {
    /// `[LABEL: LEVEL]  [TIME:ts]  message`
    #[default]
    BuiltIn,
    Custom(FormatFn),
}

impl LineFormat {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&LineParts<'_>) -> String + Send + Sync + 'static,
    {
        LineFormat::Custom(Arc::new(f))
    }

    /// transport 옵션에 맞춰 한 줄 렌더링
    ///
    /// `json`이 켜져 있으면 사용자 정의 포맷보다 우선합니다.
    pub fn render(&self, parts: &LineParts<'_>, colorize: bool, json: bool) -> String {
        if json {
            return render_json(parts);
        }

        match self {
            LineFormat::BuiltIn if colorize => render_colored(parts),
            LineFormat::BuiltIn => render_plain(parts),
            LineFormat::Custom(f) => match call_custom(f, parts) {
                Some(line) => line,
                None => {
                    eprintln!("사용자 정의 포맷 함수 panic, 기본 포맷 사용: {}", parts.message);
                    LineFormat::BuiltIn.render(parts, colorize, false)
                }
            },
        }
    }
}

/// 포맷 함수 panic은 `None`으로 바뀜
fn call_custom(f: &FormatFn, parts: &LineParts<'_>) -> Option<String> {
    let was_formatting = IN_CUSTOM_FORMAT.with(|flag| flag.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(|| f(parts)));
    IN_CUSTOM_FORMAT.with(|flag| flag.set(was_formatting));
    result.ok()
}

impl fmt::Debug for LineFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineFormat::BuiltIn => f.write_str("BuiltIn"),
            LineFormat::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn render_colored(parts: &LineParts<'_>) -> String {
    let level = parts.level.as_lower();
    format!(
        "{} {} {}",
        decorate(level, true).paint(&format!("[{}: {}]", parts.label, parts.level.as_str())),
        decorate("grey", false).paint(&format!(" [TIME:{}] ", parts.timestamp)),
        decorate(level, false).paint(parts.message)
    )
}

fn render_plain(parts: &LineParts<'_>) -> String {
    format!(
        "[{}: {}]  [TIME:{}]  {}",
        parts.label,
        parts.level.as_str(),
        parts.timestamp,
        parts.message
    )
}

fn render_json(parts: &LineParts<'_>) -> String {
    json!({
        "level": parts.level.as_lower(),
        "label": parts.label,
        "timestamp": parts.timestamp,
        "message": parts.message,
    })
    .to_string()
}
