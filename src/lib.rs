//! Admin console for the WordWise language-learning platform.

pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
pub mod listing;
#[cfg(feature = "server")]
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: models::config::ServerConfig) -> std::io::Result<()> {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::middleware::RedirectUnauthorized;
    use crate::repository::ApiRepository;
    use crate::routes::auth::{login, logout, show_login};
    use crate::routes::confirm::{cancel_action, confirm_action};
    use crate::routes::flashcard_sets::{delete_flashcard_set, show_flashcard_sets};
    use crate::routes::lists::{
        apply_filters, draft_filters, reset_filters, set_page, set_page_size, sort_by,
    };
    use crate::routes::main::show_dashboard;
    use crate::routes::multiple_choice::{delete_test, show_tests};
    use crate::routes::reports::{request_status_change, show_report, show_reports};
    use crate::routes::users::{
        delete_user, edit_user, new_user, save_user, show_users, user_flashcards,
    };

    let repo = ApiRepository::from_config(&server_config)
        .map_err(|e| std::io::Error::other(format!("Failed to build the API client: {e}")))?;

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Console listening on {}:{}, backend {}",
        bind_address.0,
        bind_address.1,
        server_config.api_base_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_login)
            .service(login)
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_dashboard)
                    .service(show_users)
                    .service(new_user)
                    .service(edit_user)
                    .service(save_user)
                    .service(delete_user)
                    .service(user_flashcards)
                    .service(show_reports)
                    .service(show_report)
                    .service(request_status_change)
                    .service(show_flashcard_sets)
                    .service(delete_flashcard_set)
                    .service(show_tests)
                    .service(delete_test)
                    .service(draft_filters)
                    .service(apply_filters)
                    .service(reset_filters)
                    .service(set_page)
                    .service(set_page_size)
                    .service(sort_by)
                    .service(confirm_action)
                    .service(cancel_action)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
