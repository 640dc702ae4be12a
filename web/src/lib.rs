#![deny(missing_docs)]

//! # formgen Web Library
//!
//! Route handlers serving the example template sources shown next to the
//! generator, plus a health check.

use actix_web::{get, web, HttpResponse, Responder};
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::OnceLock;

static TEMPLATE_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

/// Directory holding the `<name>.tsx` template files.
#[derive(Debug, Clone)]
pub struct TemplateDir(pub PathBuf);

impl TemplateDir {
    /// Reads the directory from `FORMGEN_TEMPLATES_DIR`, defaulting to `templates`.
    pub fn from_env() -> Self {
        TemplateDir(PathBuf::from(
            std::env::var("FORMGEN_TEMPLATES_DIR").unwrap_or_else(|_| "templates".to_string()),
        ))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(mut builder: actix_web::HttpResponseBuilder, message: &str) -> HttpResponse {
    builder.json(ErrorBody {
        error: message.to_string(),
    })
}

/// Whether `name` is a safe template name (`[a-zA-Z0-9-]+`).
pub fn is_valid_template_name(name: &str) -> bool {
    let re = TEMPLATE_NAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9-]+$").expect("Invalid regex"));
    re.is_match(name)
}

/// A simple health check handler.
#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// Returns the raw source of `<dir>/<name>.tsx`.
///
/// Responds 400 for names outside `[a-zA-Z0-9-]+` and 500 when the file
/// cannot be read.
#[get("/api/templates/{name}")]
pub async fn get_template(
    dir: web::Data<TemplateDir>,
    name: web::Path<String>,
) -> HttpResponse {
    let name = name.into_inner();
    if !is_valid_template_name(&name) {
        tracing::warn!(name = %name, "rejected template name");
        return error_response(HttpResponse::BadRequest(), "Invalid template name");
    }

    let path = dir.0.join(format!("{}.tsx", name));
    match web::block(move || std::fs::read_to_string(path)).await {
        Ok(Ok(source)) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(source),
        Ok(Err(e)) => {
            tracing::error!(name = %name, error = %e, "failed to read template");
            error_response(HttpResponse::InternalServerError(), "Failed to read template")
        }
        Err(e) => {
            tracing::error!(name = %name, error = %e, "template read was cancelled");
            error_response(HttpResponse::InternalServerError(), "Failed to read template")
        }
    }
}

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check).service(get_template);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use std::fs;
    use tempfile::tempdir;

    #[::std::prelude::v1::test]
    fn test_template_names() {
        assert!(is_valid_template_name("contact-form"));
        assert!(is_valid_template_name("Step2"));
        assert!(!is_valid_template_name("../secrets"));
        assert!(!is_valid_template_name("form.tsx"));
        assert!(!is_valid_template_name(""));
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_get_template() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("contact-form.tsx"), "export default function X() {}\n").unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(TemplateDir(dir.path().to_path_buf())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/templates/contact-form")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "export default function X() {}\n");
    }

    #[actix_web::test]
    async fn test_get_template_bad_name() {
        let dir = tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(TemplateDir(dir.path().to_path_buf())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/templates/form_v2")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_get_template_missing_file() {
        let dir = tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(TemplateDir(dir.path().to_path_buf())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/templates/missing")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
