//! HTTP access log 설정

use serde::{Deserialize, Serialize};

/// access log 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessLogOptions {
    /// 요청 도착 시점에 기록할지(참) 응답 완료 후 기록할지(거짓)
    pub immediate: bool,
    /// 미리 정의된 형식 이름 (`combined`, `common`, `dev`, `short`, `tiny`)
    pub level: String,
    /// 형식 문자열. 비어 있으면 `level`의 미리 정의된 형식을 사용
    pub format: String,
}

impl Default for AccessLogOptions {
    fn default() -> Self {
        Self {
            immediate: true,
            level: "combined".to_string(),
            format: "[URL: :url] [UA: :user-agent]".to_string(),
        }
    }
}
