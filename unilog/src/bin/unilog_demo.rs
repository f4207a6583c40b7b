//! unilog 데모 서버
//!
//! 호스트 설정으로 로거를 한 번 만들고 세 요청 로그 미들웨어를 마운트합니다.
//!
//! ```text
//! UNILOG_CONFIG=config/default.json UNILOG_DEMO_ADDR=127.0.0.1:8080 cargo run --bin unilog-demo
//! ```

use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use tracing::info;
use unilog::{create_logger, HostConfig, Logger};

const ADDR_ENV: &str = "UNILOG_DEMO_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:8080";

async fn health(logger: web::Data<Logger>) -> HttpResponse {
    logger.trace_system("health check");
    HttpResponse::Ok().body("ok")
}

async fn echo(logger: web::Data<Logger>, body: String) -> HttpResponse {
    logger.debug(&[&body.len(), &body]);
    HttpResponse::Ok().body(body)
}

#[actix_web::main]
async fn main() -> Result<()> {
    // 로깅 설정 (라이브러리 내부 진단 로그)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let host = HostConfig::from_env();
    let logger = create_logger(&host);
    info!(state = ?logger.state(), "로거 준비 완료");

    let addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let data = web::Data::new(logger.clone());

    info!("데모 서버 시작: {}", addr);
    logger.info(&[&"unilog demo starting", &addr]);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(logger.rotating_log_middleware())
            .wrap(logger.access_log_middleware())
            .wrap(logger.structured_log_middleware("access"))
            .route("/health", web::get().to(health))
            .route("/echo", web::post().to(echo))
    })
    .bind(&addr)
    .with_context(|| format!("주소 바인딩 실패: {}", addr))?
    .run()
    .await
    .context("데모 서버 실행 실패")?;

    Ok(())
}
