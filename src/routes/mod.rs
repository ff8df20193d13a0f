//! HTTP handlers and the helpers they share.

use actix_identity::Identity;
use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tera::{Context, Tera};

use crate::domain::auth::{AdminSession, CurrentUser};
use crate::listing::confirm::Confirmation;
use crate::listing::mutation::{Notice, Severity};
use crate::listing::{ListController, ListState};
use crate::services::ServiceError;
use crate::services::actions::PendingAction;
use crate::services::lists::Screen;

pub mod auth;
pub mod confirm;
pub mod flashcard_sets;
pub mod lists;
pub mod main;
pub mod multiple_choice;
pub mod reports;
pub mod users;

/// Session key of the signed-in operator.
pub const AUTH_SESSION_KEY: &str = "auth";
/// Session key of the confirmation dialog.
pub const CONFIRM_SESSION_KEY: &str = "confirm";

/// Maps a flash level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn severity_to_str(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "danger",
        Severity::Warning => "warning",
        Severity::Success => "success",
        Severity::Info => "info",
    }
}

/// Queues `notice` for the next rendered page.
pub fn flash_notice(notice: Notice) {
    match notice.severity {
        Severity::Success => FlashMessage::success(notice.message).send(),
        Severity::Info => FlashMessage::info(notice.message).send(),
        Severity::Warning => FlashMessage::warning(notice.message).send(),
        Severity::Error => FlashMessage::error(notice.message).send(),
    }
}

/// Notice for a failed operation: input problems warn, the rest are errors.
pub fn failure_notice(err: &ServiceError, fallback: &str) -> Notice {
    let message = err.user_message(fallback);
    if err.is_validation() {
        Notice::warning(message)
    } else {
        Notice::error(message)
    }
}

#[derive(Serialize)]
pub struct Alert<'a> {
    pub message: &'a str,
    pub level: &'static str,
}

pub fn flash_alerts(flash_messages: &IncomingFlashMessages) -> Vec<Alert<'_>> {
    flash_messages
        .iter()
        .map(|f| Alert {
            message: f.content(),
            level: alert_level_to_str(&f.level()),
        })
        .collect()
}

/// Context every console page starts from: alerts, operator and the
/// confirmation dialog if one is open.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    operator: &AdminSession,
    current_page: &str,
    session: &Session,
) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &flash_alerts(flash_messages));
    context.insert("current_user", &CurrentUser::from(operator));
    context.insert("current_page", current_page);
    context.insert("is_super_admin", &operator.is_super_admin());
    if let Some(action) = load_confirmation(session).pending() {
        context.insert("confirm", &action.dialog());
    }
    context
}

/// Adds notices produced while handling this request to the page's alerts.
pub fn push_notices(context: &mut Context, notices: &[Notice]) {
    let mut alerts = context
        .get("alerts")
        .and_then(|value| value.as_array().cloned())
        .unwrap_or_default();
    for notice in notices {
        alerts.push(serde_json::json!({
            "message": notice.message,
            "level": severity_to_str(notice.severity),
        }));
    }
    context.insert("alerts", &alerts);
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// The backend no longer accepts the token: drop the console session.
pub fn end_session(identity: Identity) -> HttpResponse {
    identity.logout();
    FlashMessage::warning("Your session has expired. Please sign in again.").send();
    redirect("/login")
}

fn session_value<T: DeserializeOwned>(session: &Session, key: &str) -> Option<T> {
    match session.get::<T>(key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Discarding unreadable session value '{key}': {err}");
            session.remove(key);
            None
        }
    }
}

fn store_session_value<T: Serialize>(session: &Session, key: &str, value: &T) {
    if let Err(err) = session.insert(key, value) {
        log::error!("Failed to store session value '{key}': {err}");
    }
}

pub fn load_list_state(session: &Session, screen: Screen, default_page_size: usize) -> ListState {
    session_value(session, &screen.session_key())
        .unwrap_or_else(|| screen.initial_state(default_page_size))
}

pub fn store_list_state(session: &Session, screen: Screen, state: &ListState) {
    store_session_value(session, &screen.session_key(), state);
}

/// Restores the controller of `screen` from the session.
pub fn restore_list<T>(session: &Session, screen: Screen, default_page_size: usize) -> ListController<T> {
    ListController::from_state(load_list_state(session, screen, default_page_size))
}

pub fn load_confirmation(session: &Session) -> Confirmation<PendingAction> {
    session_value(session, CONFIRM_SESSION_KEY).unwrap_or_default()
}

pub fn store_confirmation(session: &Session, confirmation: &Confirmation<PendingAction>) {
    store_session_value(session, CONFIRM_SESSION_KEY, confirmation);
}

/// Opens the confirmation dialog and sends the operator back to its screen.
pub fn ask_confirmation(session: &Session, action: PendingAction) -> HttpResponse {
    let mut confirmation = load_confirmation(session);
    let back = action.screen().path();
    if let Some(replaced) = confirmation.open(action) {
        log::info!("Confirmation replaced pending {replaced:?}");
    }
    store_confirmation(session, &confirmation);
    redirect(back)
}
