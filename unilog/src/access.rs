//! HTTP access log 포맷
//!
//! `:token` 또는 `:token[인자]` 형식의 토큰과 일반 문자열로 이루어진 포맷을
//! 한 번 컴파일하고 요청/응답 요약으로 한 줄을 렌더링합니다.
//!
//! # 지원 토큰
//! `:url :method :status :user-agent :referrer :remote-addr :remote-user
//! :http-version :response-time :date[clf|iso|web] :res[헤더] :req[헤더]`
//!
//! 값이 없으면 `-`로 렌더링됩니다.

use chrono::{DateTime, Utc};
use std::io::Write;
use std::time::Duration;

use crate::config::AccessLogOptions;
use crate::error::{LoggerError, LoggerResult};
use crate::middleware::{RequestObserver, RequestSummary, ResponseSummary};

const COMBINED: &str = ":remote-addr - :remote-user [:date[clf]] \":method :url HTTP/:http-version\" :status :res[content-length] \":referrer\" \":user-agent\"";
const COMMON: &str =
    ":remote-addr - :remote-user [:date[clf]] \":method :url HTTP/:http-version\" :status :res[content-length]";
const DEV: &str = ":method :url :status :response-time ms - :res[content-length]";
const SHORT: &str = ":remote-addr :remote-user :method :url HTTP/:http-version :status :res[content-length] - :response-time ms";
const TINY: &str = ":method :url :status :res[content-length] - :response-time ms";

/// 이름으로 미리 정의된 포맷 문자열 조회
pub fn preset(name: &str) -> Option<&'static str> {
    match name.trim().to_ascii_lowercase().as_str() {
        "combined" => Some(COMBINED),
        "common" => Some(COMMON),
        "dev" => Some(DEV),
        "short" => Some(SHORT),
        "tiny" => Some(TINY),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateStyle {
    Clf,
    Iso,
    Web,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Url,
    Method,
    Status,
    UserAgent,
    Referrer,
    RemoteAddr,
    RemoteUser,
    HttpVersion,
    ResponseTime,
    Date(DateStyle),
    Response(String),
    Request(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Token(Token),
}

/// 컴파일된 access log 포맷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogFormat {
    segments: Vec<Segment>,
}

impl AccessLogFormat {
    /// 포맷 문자열 컴파일. 알 수 없는 토큰은 에러
    pub fn compile(format: &str) -> LoggerResult<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = format;

        while let Some(pos) = rest.find(':') {
            literal.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            let name_len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
                .unwrap_or(after.len());

            // 두 글자 미만이면 토큰이 아닌 일반 문자
            if name_len < 2 {
                literal.push(':');
                rest = after;
                continue;
            }

            let name = &after[..name_len];
            let mut consumed = name_len;
            let mut arg = None;
            if let Some(inner) = after[name_len..].strip_prefix('[') {
                if let Some(end) = inner.find(']') {
                    arg = Some(&inner[..end]);
                    consumed += end + 2;
                }
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Token(parse_token(name, arg)?));
            rest = &after[consumed..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// `format`이 비어 있으면 `level`에 해당하는 미리 정의된 포맷 사용
    pub fn from_options(options: &AccessLogOptions) -> LoggerResult<Self> {
        if !options.format.trim().is_empty() {
            return Self::compile(&options.format);
        }

        let format = preset(&options.level).ok_or_else(|| {
            LoggerError::AccessFormat(format!("알 수 없는 미리 정의된 포맷: {}", options.level))
        })?;
        Self::compile(format)
    }

    /// 한 줄 렌더링. 응답 전이면 응답 관련 토큰은 `-`
    pub fn render(
        &self,
        request: &RequestSummary,
        response: Option<&ResponseSummary>,
        elapsed: Option<Duration>,
    ) -> String {
        self.render_at(Utc::now(), request, response, elapsed)
    }

    fn render_at(
        &self,
        now: DateTime<Utc>,
        request: &RequestSummary,
        response: Option<&ResponseSummary>,
        elapsed: Option<Duration>,
    ) -> String {
        let mut line = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Token(token) => {
                    let value = token_value(token, now, request, response, elapsed);
                    line.push_str(value.as_deref().unwrap_or("-"));
                }
            }
        }
        line
    }
}

fn parse_token(name: &str, arg: Option<&str>) -> LoggerResult<Token> {
    let token = match (name, arg) {
        ("url", _) => Token::Url,
        ("method", _) => Token::Method,
        ("status", _) => Token::Status,
        ("user-agent", _) => Token::UserAgent,
        ("referrer" | "referer", _) => Token::Referrer,
        ("remote-addr", _) => Token::RemoteAddr,
        ("remote-user", _) => Token::RemoteUser,
        ("http-version", _) => Token::HttpVersion,
        ("response-time", _) => Token::ResponseTime,
        ("date", None | Some("web")) => Token::Date(DateStyle::Web),
        ("date", Some("clf")) => Token::Date(DateStyle::Clf),
        ("date", Some("iso")) => Token::Date(DateStyle::Iso),
        ("res", Some(header)) => Token::Response(header.trim().to_ascii_lowercase()),
        ("req", Some(header)) => Token::Request(header.trim().to_ascii_lowercase()),
        _ => {
            let shown = match arg {
                Some(arg) => format!(":{}[{}]", name, arg),
                None => format!(":{}", name),
            };
            return Err(LoggerError::AccessFormat(format!("알 수 없는 토큰 {}", shown)));
        }
    };
    Ok(token)
}

fn token_value(
    token: &Token,
    now: DateTime<Utc>,
    request: &RequestSummary,
    response: Option<&ResponseSummary>,
    elapsed: Option<Duration>,
) -> Option<String> {
    match token {
        Token::Url => Some(request.url.clone()),
        Token::Method => Some(request.method.clone()),
        Token::Status => response.map(|r| r.status.to_string()),
        Token::UserAgent => request.header("user-agent").map(str::to_string),
        Token::Referrer => request
            .header("referer")
            .or_else(|| request.header("referrer"))
            .map(str::to_string),
        Token::RemoteAddr => Some(request.remote_addr.clone()),
        Token::RemoteUser => None,
        Token::HttpVersion => Some(request.http_version.clone()),
        Token::ResponseTime => response
            .and(elapsed)
            .map(|d| format!("{:.3}", d.as_secs_f64() * 1000.0)),
        Token::Date(style) => Some(match style {
            DateStyle::Clf => now.format("%d/%b/%Y:%H:%M:%S +0000").to_string(),
            DateStyle::Iso => now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            DateStyle::Web => now.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        }),
        Token::Response(header) => response
            .and_then(|r| r.header(header))
            .map(str::to_string),
        Token::Request(header) => request.header(header).map(str::to_string),
    }
}

/// 렌더링한 줄을 출력 스트림에 쓰는 observer
///
/// `immediate`면 요청 도착 시점에, 아니면 응답 완료 후 기록합니다.
pub struct AccessLogObserver<W> {
    format: AccessLogFormat,
    immediate: bool,
    target: W,
}

impl<W> AccessLogObserver<W>
where
    W: Send + Sync,
    for<'a> &'a W: Write,
{
    pub fn new(format: AccessLogFormat, immediate: bool, target: W) -> Self {
        Self {
            format,
            immediate,
            target,
        }
    }

    pub fn from_options(options: &AccessLogOptions, target: W) -> LoggerResult<Self> {
        Ok(Self::new(
            AccessLogFormat::from_options(options)?,
            options.immediate,
            target,
        ))
    }

    fn write_line(&self, line: String) -> LoggerResult<()> {
        let mut line = line;
        line.push('\n');
        (&self.target)
            .write_all(line.as_bytes())
            .map_err(LoggerError::Stream)
    }
}

impl<W> RequestObserver for AccessLogObserver<W>
where
    W: Send + Sync,
    for<'a> &'a W: Write,
{
    fn on_request(&self, request: &RequestSummary) -> LoggerResult<()> {
        if !self.immediate {
            return Ok(());
        }
        self.write_line(self.format.render(request, None, None))
    }

    fn on_response(
        &self,
        request: &RequestSummary,
        response: &ResponseSummary,
        elapsed: Duration,
    ) -> LoggerResult<()> {
        if self.immediate {
            return Ok(());
        }
        self.write_line(self.format.render(request, Some(response), Some(elapsed)))
    }
}
