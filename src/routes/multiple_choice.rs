use actix_identity::Identity;
use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AdminSession;
use crate::domain::multiple_choice::MultipleChoiceTest;
use crate::listing::ListView;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::flashcard_sets::DeleteContentForm;
use crate::routes::{ask_confirmation, base_context, end_session, render_template, restore_list};
use crate::services::actions::PendingAction;
use crate::services::lists::Screen;
use crate::services::multiple_choice as tests_service;

#[get("/tests")]
pub async fn show_tests(
    operator: AdminSession,
    identity: Identity,
    session: Session,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_session(&operator);
    let mut list =
        restore_list::<MultipleChoiceTest>(&session, Screen::Tests, server_config.default_page_size);

    if let Err(err) = tests_service::load_tests(&repo, &mut list).await {
        if err.is_session_expired() {
            return end_session(identity);
        }
        log::error!("Failed to load multiple-choice tests: {err}");
    }

    let mut context = base_context(&flash_messages, &operator, "tests", &session);
    context.insert("screen", &Screen::Tests);
    context.insert("list", &ListView::new(&list));
    render_template(&tera, "content/tests.html", &context)
}

#[post("/tests/{test_id}/delete")]
pub async fn delete_test(
    test_id: web::Path<i32>,
    _operator: AdminSession,
    session: Session,
    web::Form(form): web::Form<DeleteContentForm>,
) -> impl Responder {
    let id = test_id.into_inner();
    let title = form.title_or(id);
    ask_confirmation(&session, PendingAction::DeleteTest { id, title })
}
