use actix_identity::Identity;
use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::domain::auth::AdminSession;
use crate::domain::flashcard_set::FlashcardSet;
use crate::listing::ListView;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{ask_confirmation, base_context, end_session, render_template, restore_list};
use crate::services::actions::PendingAction;
use crate::services::flashcard_sets as sets_service;
use crate::services::lists::Screen;

/// Title shown in the confirmation dialog of a content delete.
#[derive(Deserialize)]
pub struct DeleteContentForm {
    #[serde(default)]
    pub title: String,
}

impl DeleteContentForm {
    pub fn title_or(&self, id: i32) -> String {
        match self.title.trim() {
            "" => format!("#{id}"),
            title => title.to_string(),
        }
    }
}

#[get("/flashcard-sets")]
pub async fn show_flashcard_sets(
    operator: AdminSession,
    identity: Identity,
    session: Session,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_session(&operator);
    let mut list = restore_list::<FlashcardSet>(
        &session,
        Screen::FlashcardSets,
        server_config.default_page_size,
    );

    if let Err(err) = sets_service::load_flashcard_sets(&repo, &mut list).await {
        if err.is_session_expired() {
            return end_session(identity);
        }
        log::error!("Failed to load flashcard sets: {err}");
    }

    let mut context = base_context(&flash_messages, &operator, "flashcard-sets", &session);
    context.insert("screen", &Screen::FlashcardSets);
    context.insert("list", &ListView::new(&list));
    render_template(&tera, "content/flashcard_sets.html", &context)
}

#[post("/flashcard-sets/{set_id}/delete")]
pub async fn delete_flashcard_set(
    set_id: web::Path<i32>,
    _operator: AdminSession,
    session: Session,
    web::Form(form): web::Form<DeleteContentForm>,
) -> impl Responder {
    let id = set_id.into_inner();
    let title = form.title_or(id);
    ask_confirmation(&session, PendingAction::DeleteFlashcardSet { id, title })
}
