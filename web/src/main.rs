#![deny(missing_docs)]

//! # formgen Web Binary
//!
//! Entry point for the Actix Web server.

use actix_web::{web, App, HttpServer};
use formgen_web::{configure, TemplateDir};
use std::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn build_server(
    listener: TcpListener,
    templates: TemplateDir,
) -> std::io::Result<actix_web::dev::Server> {
    let templates = web::Data::new(templates);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(templates.clone())
            .configure(configure)
    })
    .listen(listener)?
    .run())
}

fn resolve_bind_addr() -> String {
    std::env::var("FORMGEN_WEB_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .ok();

    let bind_addr = resolve_bind_addr();
    let templates = TemplateDir::from_env();
    let listener = TcpListener::bind(&bind_addr)?;
    tracing::info!(addr = %bind_addr, templates = ?templates.0, "starting server");
    let server = build_server(listener, templates)?;

    if std::env::var("FORMGEN_WEB_ONESHOT").is_ok() {
        server.handle().stop(true).await;
    }

    server.await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_oneshot() {
        std::env::set_var("FORMGEN_WEB_BIND", "127.0.0.1:0");
        std::env::set_var("FORMGEN_WEB_ONESHOT", "1");

        let res = main();

        std::env::remove_var("FORMGEN_WEB_BIND");
        std::env::remove_var("FORMGEN_WEB_ONESHOT");

        assert!(res.is_ok());
    }

    #[actix_web::test]
    async fn test_build_server_start_stop() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let server = build_server(listener, TemplateDir("templates".into())).unwrap();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        handle.stop(true).await;
    }
}
