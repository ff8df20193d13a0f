//! Controls shared by every listing screen.

use actix_session::Session;
use actix_web::{HttpResponse, Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::domain::auth::AdminSession;
use crate::forms::lists::{FilterForm, PageForm, PageSizeForm, SortForm};
use crate::models::config::ServerConfig;
use crate::routes::{load_list_state, redirect, store_list_state};
use crate::services::lists::{ListCommand, Screen, apply_command};

fn run_command(
    session: &Session,
    screen: &str,
    default_page_size: usize,
    command: impl FnOnce(Screen) -> ListCommand,
) -> Option<Screen> {
    let screen = match screen.parse::<Screen>() {
        Ok(screen) => screen,
        Err(_) => {
            log::warn!("List command for unknown screen '{screen}'");
            return None;
        }
    };
    let state = load_list_state(session, screen, default_page_size);
    match apply_command(screen, state, command(screen)) {
        Ok(state) => store_list_state(session, screen, &state),
        Err(err) => FlashMessage::warning(err.to_string()).send(),
    }
    Some(screen)
}

/// Parses the filter form; a body that cannot be read is logged and dropped.
fn read_filters(screen: &str, body: &[u8]) -> Option<FilterForm> {
    match FilterForm::from_body(body) {
        Ok(form) => Some(form),
        Err(err) => {
            log::warn!("Unreadable filter form for '{screen}': {err}");
            None
        }
    }
}

fn back_to(screen: Option<Screen>) -> HttpResponse {
    match screen {
        Some(screen) => redirect(screen.path()),
        None => HttpResponse::NotFound().finish(),
    }
}

/// Remembers filter input without fetching.
#[post("/lists/{screen}/draft")]
pub async fn draft_filters(
    screen: web::Path<String>,
    _operator: AdminSession,
    session: Session,
    server_config: web::Data<ServerConfig>,
    form: web::Bytes,
) -> impl Responder {
    let Some(form) = read_filters(&screen, &form) else {
        return HttpResponse::BadRequest().finish();
    };
    match run_command(&session, &screen, server_config.default_page_size, |screen| {
        ListCommand::Draft(form.into_filters(screen))
    }) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => HttpResponse::NotFound().finish(),
    }
}

#[post("/lists/{screen}/apply")]
pub async fn apply_filters(
    screen: web::Path<String>,
    _operator: AdminSession,
    session: Session,
    server_config: web::Data<ServerConfig>,
    form: web::Bytes,
) -> impl Responder {
    let Some(form) = read_filters(&screen, &form) else {
        FlashMessage::warning("The filters could not be read. Please try again.").send();
        return back_to(screen.parse().ok());
    };
    back_to(run_command(&session, &screen, server_config.default_page_size, |screen| {
        ListCommand::Apply(form.into_filters(screen))
    }))
}

#[post("/lists/{screen}/reset")]
pub async fn reset_filters(
    screen: web::Path<String>,
    _operator: AdminSession,
    session: Session,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    back_to(run_command(&session, &screen, server_config.default_page_size, |_| {
        ListCommand::Reset
    }))
}

#[post("/lists/{screen}/page")]
pub async fn set_page(
    screen: web::Path<String>,
    _operator: AdminSession,
    session: Session,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<PageForm>,
) -> impl Responder {
    back_to(run_command(&session, &screen, server_config.default_page_size, |_| {
        ListCommand::Page(form.index)
    }))
}

#[post("/lists/{screen}/page-size")]
pub async fn set_page_size(
    screen: web::Path<String>,
    _operator: AdminSession,
    session: Session,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<PageSizeForm>,
) -> impl Responder {
    back_to(run_command(&session, &screen, server_config.default_page_size, |_| {
        ListCommand::PageSize(form.size)
    }))
}

#[post("/lists/{screen}/sort")]
pub async fn sort_by(
    screen: web::Path<String>,
    _operator: AdminSession,
    session: Session,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<SortForm>,
) -> impl Responder {
    back_to(run_command(&session, &screen, server_config.default_page_size, |_| {
        ListCommand::Sort(form.field)
    }))
}
