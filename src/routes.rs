use actix_web::{HttpResponse, get, post, web};
use serde_json::json;
use tracing::info;

use crate::{
    AppState,
    document::{self, LogDocument},
    error::AppError,
    filter::digest_matches,
    models::WindowQuery,
    timecode::Resolution,
    window::{TimeWindow, window_bounds},
};

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/api/log")
            .service(coverage)
            .service(coverage_json)
            .service(matches)
            .service(matches_json),
    );
}

#[get("/healthz")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "logspan",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/coverage")]
async fn coverage(
    query: web::Query<WindowQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    coverage_response(query.into_inner(), &state).await
}

#[post("/coverage")]
async fn coverage_json(
    body: web::Json<WindowQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    coverage_response(body.into_inner(), &state).await
}

/// Checks whether the log's covered range strictly brackets the requested
/// window, reading only a head and a tail chunk. The verdict rides on both
/// the body and the status code: 200/true or 404/false.
async fn coverage_response(
    params: WindowQuery,
    state: &AppState,
) -> Result<HttpResponse, AppError> {
    let window = TimeWindow::from_params(&params.time, &params.tolerance, Resolution::Minutes)?;

    let head = state.source.fetch_head(state.probe_bytes).await?;
    let tail = state.source.fetch_tail(state.probe_bytes).await?;
    let first = document::head_line(&head)?;
    let last = document::tail_line(&tail)?;

    let first_ts = i64::from(Resolution::Minutes.line_timestamp(&first)?);
    let last_ts = i64::from(Resolution::Minutes.line_timestamp(&last)?);

    if window.inside(first_ts, last_ts) {
        Ok(HttpResponse::Ok().json(true))
    } else {
        Ok(HttpResponse::NotFound().json(false))
    }
}

#[get("/matches")]
async fn matches(
    query: web::Query<WindowQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    matches_response(query.into_inner(), &state).await
}

#[post("/matches")]
async fn matches_json(
    body: web::Json<WindowQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    matches_response(body.into_inner(), &state).await
}

/// Loads the full log, locates the window by binary search and returns the
/// MD5 digests of motif-matching lines inside it, joined with ", ". An empty
/// window is a 200 with an empty string.
async fn matches_response(
    params: WindowQuery,
    state: &AppState,
) -> Result<HttpResponse, AppError> {
    let window = TimeWindow::from_params(&params.time, &params.tolerance, Resolution::Seconds)?;

    let bytes = state.source.fetch_full().await?;
    let doc = LogDocument::from_bytes(&bytes);
    if state.verify_order {
        doc.verify_sorted(Resolution::Seconds)?;
    }

    let digests = match window_bounds(&doc, &window)? {
        Some((start, end)) => digest_matches(&doc, start, end),
        None => Vec::new(),
    };
    info!(
        base = window.base,
        low = window.low,
        high = window.high,
        matched = digests.len(),
        "window scan complete"
    );

    Ok(HttpResponse::Ok().json(digests.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::source::FileSource;

    fn state_for(contents: &[u8]) -> (NamedTempFile, web::Data<AppState>) {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents).expect("write fixture");
        let state = web::Data::new(AppState {
            source: FileSource::new(file.path().to_path_buf()),
            probe_bytes: 200,
            verify_order: false,
        });
        (file, state)
    }

    macro_rules! service {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(register)).await
        };
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let (_file, state) = state_for(b"00:00 a\n");
        let app = service!(state);
        let resp = test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request())
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn coverage_inside_is_200_true() {
        let (_file, state) = state_for(b"00:00 day start\n12:00 noon\n23:59 day end\n");
        let app = service!(state);
        let req = test::TestRequest::get()
            .uri("/api/log/coverage?T=12:00&dT=00:05")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: bool = test::read_body_json(resp).await;
        assert!(body);
    }

    #[actix_web::test]
    async fn coverage_outside_is_404_false() {
        let (_file, state) = state_for(b"08:00 late start\n12:00 noon\n17:00 early end\n");
        let app = service!(state);
        let req = test::TestRequest::get()
            .uri("/api/log/coverage?T=07:00&dT=00:05")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: bool = test::read_body_json(resp).await;
        assert!(!body);
    }

    #[actix_web::test]
    async fn coverage_accepts_json_body() {
        let (_file, state) = state_for(b"00:00 day start\n23:59 day end\n");
        let app = service!(state);
        let req = test::TestRequest::post()
            .uri("/api/log/coverage")
            .set_json(serde_json::json!({ "T": "12:00", "dT": "00:05" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn malformed_time_parameter_is_400() {
        let (_file, state) = state_for(b"00:00 a\n23:59 b\n");
        let app = service!(state);
        let req = test::TestRequest::get()
            .uri("/api/log/coverage?T=noon&dT=00:05")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn matches_returns_joined_digests_in_file_order() {
        let (_file, state) = state_for(
            b"00:00:01 ae0ae0ae0ae0ae0\n00:05:00 hello\n00:10:00 A5fB6gC7hD8iE9j\n",
        );
        let app = service!(state);
        let req = test::TestRequest::get()
            .uri("/api/log/matches?T=00:05:00&dT=00:10:00")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: String = test::read_body_json(resp).await;
        assert_eq!(
            body,
            "335e629639131b063004e840e16b0212, 0b4de4449d82f6a8d73093f7c671f8b1"
        );
    }

    #[actix_web::test]
    async fn matches_is_idempotent() {
        let (_file, state) = state_for(
            b"00:00:01 ae0ae0ae0ae0ae0\n00:05:00 hello\n00:10:00 A5fB6gC7hD8iE9j\n",
        );
        let app = service!(state);
        let mut bodies = Vec::new();
        for _ in 0..2 {
            let req = test::TestRequest::get()
                .uri("/api/log/matches?T=00:05:00&dT=00:10:00")
                .to_request();
            let resp = test::call_service(&app, req).await;
            let body: String = test::read_body_json(resp).await;
            bodies.push(body);
        }
        assert_eq!(bodies[0], bodies[1]);
    }

    #[actix_web::test]
    async fn window_before_document_is_200_empty() {
        let (_file, state) = state_for(b"05:00:00 ae0ae0ae0ae0ae0\n06:00:00 b\n");
        let app = service!(state);
        let req = test::TestRequest::get()
            .uri("/api/log/matches?T=00:10:00&dT=00:05:00")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: String = test::read_body_json(resp).await;
        assert_eq!(body, "");
    }

    #[actix_web::test]
    async fn empty_log_file_is_422() {
        let (_file, state) = state_for(b"");
        let app = service!(state);
        let req = test::TestRequest::get()
            .uri("/api/log/matches?T=00:10:00&dT=00:05:00")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn verify_order_flag_rejects_unsorted_log() {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(b"06:00:00 b\n05:00:00 a\n").expect("write fixture");
        let state = web::Data::new(AppState {
            source: FileSource::new(file.path().to_path_buf()),
            probe_bytes: 200,
            verify_order: true,
        });
        let app = service!(state);
        let req = test::TestRequest::get()
            .uri("/api/log/matches?T=05:30:00&dT=00:05:00")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
