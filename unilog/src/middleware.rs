//! HTTP 요청 로그 미들웨어
//!
//! 세 백엔드의 요청 로그는 모두 하나의 미들웨어 타입(`RequestLogger`)으로 마운트됩니다.
//! 백엔드별 차이는 `RequestObserver` 구현으로만 표현되며, observer가 없으면
//! 요청을 그대로 다음 서비스로 넘기는 pass-through 미들웨어가 됩니다.
//!
//! 로그 기록 실패는 표준 에러로만 알리고 응답에는 영향을 주지 않습니다.

use actix_web::{
    body::MessageBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::HeaderMap,
    Error,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::LoggerResult;

/// 로그에 필요한 요청 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub method: String,
    /// 경로와 쿼리 문자열
    pub url: String,
    /// `1.1`, `2.0`
    pub http_version: String,
    /// 연결 상대 IP, 알 수 없으면 `-`
    pub remote_addr: String,
    /// 소문자 헤더 이름과 값
    pub headers: Vec<(String, String)>,
}

impl RequestSummary {
    pub fn from_request(req: &ServiceRequest) -> Self {
        let http_version = format!("{:?}", req.version());

        Self {
            method: req.method().to_string(),
            url: req.uri().to_string(),
            http_version: http_version
                .strip_prefix("HTTP/")
                .unwrap_or(&http_version)
                .to_string(),
            remote_addr: req
                .peer_addr()
                .map(|addr| addr.ip().to_string())
                .unwrap_or_else(|| "-".to_string()),
            headers: collect_headers(req.headers()),
        }
    }

    /// 대소문자 구분 없는 헤더 조회
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// 로그에 필요한 응답 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSummary {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl ResponseSummary {
    pub fn from_response<B>(res: &ServiceResponse<B>) -> Self {
        Self {
            status: res.status().as_u16(),
            headers: collect_headers(res.headers()),
        }
    }

    /// 내부 서비스가 에러를 반환한 경우 에러가 만들 응답 기준으로 요약
    pub fn from_error(err: &Error) -> Self {
        Self {
            status: err.as_response_error().status_code().as_u16(),
            headers: Vec::new(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn collect_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_ascii_lowercase(), value.to_string()))
        })
        .collect()
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// 요청 도착과 응답 완료 시점에 호출되는 로그 기록기
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, _request: &RequestSummary) -> LoggerResult<()> {
        Ok(())
    }

    fn on_response(
        &self,
        request: &RequestSummary,
        response: &ResponseSummary,
        elapsed: Duration,
    ) -> LoggerResult<()>;
}

/// 요청 로그 미들웨어
#[derive(Clone, Default)]
pub struct RequestLogger {
    observer: Option<Arc<dyn RequestObserver>>,
}

impl RequestLogger {
    pub fn new<O: RequestObserver + 'static>(observer: O) -> Self {
        Self {
            observer: Some(Arc::new(observer)),
        }
    }

    /// 아무 것도 기록하지 않고 요청을 그대로 넘기는 미들웨어
    pub fn pass_through() -> Self {
        Self::default()
    }

    pub fn is_pass_through(&self) -> bool {
        self.observer.is_none()
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerService {
            service: Rc::new(service),
            observer: self.observer.clone(),
        }))
    }
}

pub struct RequestLoggerService<S> {
    service: Rc<S>,
    observer: Option<Arc<dyn RequestObserver>>,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(observer) = self.observer.clone() else {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await });
        };

        let request = RequestSummary::from_request(&req);
        report(observer.on_request(&request));

        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let response = match &result {
                Ok(res) => ResponseSummary::from_response(res),
                Err(err) => ResponseSummary::from_error(err),
            };
            report(observer.on_response(&request, &response, started.elapsed()));
            result
        })
    }
}

fn report(result: LoggerResult<()>) {
    if let Err(e) = result {
        eprintln!("요청 로그 기록 실패: {}", e);
    }
}
