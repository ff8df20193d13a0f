use std::time::Duration;

use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use tera::Tera;

use wordwise_admin::listing::mutation::Severity;
use wordwise_admin::middleware::RedirectUnauthorized;
use wordwise_admin::models::config::ServerConfig;
use wordwise_admin::repository::ApiRepository;
use wordwise_admin::routes::lists::reset_filters;
use wordwise_admin::routes::users::show_users;
use wordwise_admin::routes::{alert_level_to_str, severity_to_str};

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[::core::prelude::v1::test]
fn test_severity_to_str_matches_flash_levels() {
    assert_eq!(severity_to_str(Severity::Error), "danger");
    assert_eq!(severity_to_str(Severity::Warning), "warning");
    assert_eq!(severity_to_str(Severity::Success), "success");
    assert_eq!(severity_to_str(Severity::Info), "info");
}

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".into(),
        address: "127.0.0.1".into(),
        port: 8080,
        templates_dir: "templates/**/*".into(),
        secret: "0".repeat(64),
        api_base_url: "http://127.0.0.1:9".into(),
        api_timeout_secs: 1,
        default_page_size: 20,
    }
}

#[actix_web::test]
async fn anonymous_operator_is_sent_to_login() {
    let config = server_config();
    let key = Key::from(config.secret.as_bytes());
    let repo = ApiRepository::new(&config.api_base_url, Duration::from_secs(1)).unwrap();
    let flash = FlashMessagesFramework::builder(CookieMessageStore::builder(key.clone()).build())
        .build();

    let app = test::init_service(
        App::new()
            .wrap(flash)
            .wrap(IdentityMiddleware::default())
            .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_users)
                    .service(reset_filters),
            )
            .app_data(web::Data::new(Tera::default()))
            .app_data(web::Data::new(repo))
            .app_data(web::Data::new(config)),
    )
    .await;

    for req in [
        test::TestRequest::get().uri("/users").to_request(),
        test::TestRequest::post().uri("/lists/users/reset").to_request(),
    ] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
    }
}
