//! 콘솔 색상 데코레이터
//!
//! 레벨 태그를 ANSI 스타일로 매핑합니다. 알 수 없는 레벨은 회색입니다.

/// 지원 색상
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Cyan,
    Red,
    Yellow,
    Grey,
}

impl Color {
    fn code(&self) -> &'static str {
        match self {
            Color::Green => "\x1b[32m",
            Color::Cyan => "\x1b[36m",
            Color::Red => "\x1b[31m",
            Color::Yellow => "\x1b[33m",
            Color::Grey => "\x1b[90m",
        }
    }
}

const INVERSE: &str = "\x1b[7m";
const INVERSE_OFF: &str = "\x1b[27m";
const COLOR_OFF: &str = "\x1b[39m";

/// 텍스트에 적용할 스타일
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: Color,
    inverse: bool,
}

impl Style {
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    /// 스타일을 적용한 문자열 반환
    pub fn paint(&self, text: &str) -> String {
        if self.inverse {
            format!(
                "{}{}{}{}{}",
                INVERSE,
                self.color.code(),
                text,
                COLOR_OFF,
                INVERSE_OFF
            )
        } else {
            format!("{}{}{}", self.color.code(), text, COLOR_OFF)
        }
    }
}

/// 레벨 태그에 해당하는 스타일 반환
///
/// `inverse`가 참이면 배경 강조(반전) 스타일을 돌려줍니다.
/// 라인의 레이블 구간과 메시지 본문을 구분할 때 사용합니다.
pub fn decorate(level: &str, inverse: bool) -> Style {
    let color = match level.to_ascii_lowercase().as_str() {
        "info" => Color::Green,
        "debug" => Color::Cyan,
        "error" => Color::Red,
        "warn" => Color::Yellow,
        _ => Color::Grey,
    };
    Style { color, inverse }
}
