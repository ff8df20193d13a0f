use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AdminSession;
use crate::repository::ApiRepository;
use crate::routes::{base_context, end_session, render_template};
use crate::services::dashboard as dashboard_service;

#[get("/")]
pub async fn show_dashboard(
    operator: AdminSession,
    identity: Identity,
    session: Session,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_session(&operator);
    match dashboard_service::load_dashboard(&repo).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &operator, "dashboard", &session);
            context.insert("stats", &data.stats);
            render_template(&tera, "main/dashboard.html", &context)
        }
        Err(err) if err.is_session_expired() => end_session(identity),
        Err(err) => {
            log::error!("Failed to load the dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
