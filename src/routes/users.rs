use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::auth::AdminSession;
use crate::domain::user::{ASSIGNABLE_ROLES, User};
use crate::forms::users::SaveUserForm;
use crate::listing::{FilterValue, Filters, ListView};
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{
    ask_confirmation, base_context, end_session, failure_notice, flash_notice, load_list_state,
    redirect, render_template, restore_list, store_list_state,
};
use crate::services::actions::PendingAction;
use crate::services::lists::{ListCommand, Screen, apply_command};
use crate::services::users as users_service;

#[get("/users")]
pub async fn show_users(
    operator: AdminSession,
    identity: Identity,
    session: Session,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_session(&operator);
    let mut list = restore_list::<User>(&session, Screen::Users, server_config.default_page_size);

    if let Err(err) = users_service::load_users(&repo, &mut list).await {
        if err.is_session_expired() {
            return end_session(identity);
        }
        log::error!("Failed to load users: {err}");
    }

    let mut context = base_context(&flash_messages, &operator, "users", &session);
    context.insert("screen", &Screen::Users);
    context.insert("list", &ListView::new(&list));
    context.insert("roles", &ASSIGNABLE_ROLES);
    render_template(&tera, "users/index.html", &context)
}

#[get("/users/new")]
pub async fn new_user(
    operator: AdminSession,
    session: Session,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_session(&operator);
    match users_service::load_user_form(&repo, &operator, None).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &operator, "users", &session);
            context.insert("form", &data);
            render_template(&tera, "users/edit.html", &context)
        }
        Err(err) => {
            log::error!("Failed to prepare the user form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/users/{user_id}/edit")]
pub async fn edit_user(
    user_id: web::Path<String>,
    operator: AdminSession,
    identity: Identity,
    session: Session,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_session(&operator);
    match users_service::load_user_form(&repo, &operator, Some(user_id.as_str())).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &operator, "users", &session);
            context.insert("form", &data);
            render_template(&tera, "users/edit.html", &context)
        }
        Err(err) if err.is_session_expired() => end_session(identity),
        Err(err) => {
            flash_notice(failure_notice(&err, "Error loading user"));
            redirect("/users")
        }
    }
}

/// The roles checkboxes repeat one field name, hence the raw body.
#[post("/users/save")]
pub async fn save_user(
    operator: AdminSession,
    identity: Identity,
    repo: web::Data<ApiRepository>,
    form: web::Bytes,
) -> impl Responder {
    let form: SaveUserForm = match serde_html_form::from_bytes(&form) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse the user form: {err}");
            FlashMessage::warning("Please fill in all required fields.").send();
            return redirect("/users");
        }
    };
    let back = if form.id.trim().is_empty() {
        "/users/new".to_string()
    } else {
        format!("/users/{}/edit", form.id.trim())
    };

    let repo = repo.with_session(&operator);
    match users_service::save_user(&repo, &operator, form).await {
        Ok(outcome) => {
            outcome.notices.into_iter().for_each(flash_notice);
            redirect("/users")
        }
        Err(err) if err.is_session_expired() => end_session(identity),
        Err(err) => {
            flash_notice(failure_notice(&err, "Error saving user"));
            redirect(&back)
        }
    }
}

#[derive(Deserialize)]
pub struct DeleteUserForm {
    #[serde(default)]
    label: String,
}

#[post("/users/{user_id}/delete")]
pub async fn delete_user(
    user_id: web::Path<String>,
    _operator: AdminSession,
    session: Session,
    web::Form(form): web::Form<DeleteUserForm>,
) -> impl Responder {
    let id = user_id.into_inner();
    let label = if form.label.trim().is_empty() {
        id.clone()
    } else {
        form.label.trim().to_string()
    };
    ask_confirmation(&session, PendingAction::DeleteUser { id, label })
}

/// Opens the flashcard screen filtered by one user.
#[get("/users/{user_id}/flashcards")]
pub async fn user_flashcards(
    user_id: web::Path<String>,
    _operator: AdminSession,
    session: Session,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let screen = Screen::FlashcardSets;
    let state = load_list_state(&session, screen, server_config.default_page_size);
    let filters = Filters::new().with("userId", FilterValue::Text(user_id.into_inner()));
    match apply_command(screen, state, ListCommand::Apply(filters)) {
        Ok(state) => store_list_state(&session, screen, &state),
        Err(err) => log::error!("Failed to filter flashcard sets by user: {err}"),
    }
    redirect(screen.path())
}
