//! 날짜 패턴 변환
//!
//! 설정에 쓰이는 moment 스타일(`YYYY-MM-DD HH:mm:ss`)과 log4js 스타일(`-yyyy-MM-dd`)
//! 패턴을 chrono 포맷 문자열로 바꿉니다. `hh`는 log4js와 같이 24시간제로 해석합니다.

const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("yyyy", "%Y"),
    ("SSS", "%3f"),
    ("YY", "%y"),
    ("yy", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("dd", "%d"),
    ("HH", "%H"),
    ("hh", "%H"),
    ("mm", "%M"),
    ("ss", "%S"),
];

/// 패턴을 chrono `format` 문자열로 변환
///
/// 토큰이 아닌 문자는 그대로 유지되며 `%`는 이스케이프됩니다.
pub fn to_chrono(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'scan: while let Some(ch) = rest.chars().next() {
        for (token, spec) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = tail;
                continue 'scan;
            }
        }

        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }

    out
}
