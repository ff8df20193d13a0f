//! Answers to the confirmation dialog.

use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AdminSession;
use crate::domain::report::ContentReport;
use crate::listing::mutation::{MutationOutcome, Notice, settle};
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::reports::render_reports;
use crate::routes::{
    base_context, end_session, failure_notice, flash_notice, load_confirmation, redirect,
    restore_list, store_confirmation,
};
use crate::services::actions::PendingAction;
use crate::services::lists::Screen;
use crate::services::reports::{self as reports_service, ReportsSource};
use crate::services::{
    ServiceResult, flashcard_sets as sets_service, multiple_choice as tests_service,
    users as users_service,
};

/// Follows a re-fetching mutation: notices are flashed and the screen's GET
/// loads the current page again.
fn after_refetch<T>(
    identity: Identity,
    screen: Screen,
    result: ServiceResult<MutationOutcome<T>>,
    fallback: &str,
) -> HttpResponse {
    match result {
        Ok(outcome) => outcome.notices.into_iter().for_each(flash_notice),
        Err(err) if err.is_session_expired() => return end_session(identity),
        Err(err) => flash_notice(failure_notice(&err, fallback)),
    }
    redirect(screen.path())
}

#[post("/confirm")]
pub async fn confirm_action(
    operator: AdminSession,
    identity: Identity,
    session: Session,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut confirmation = load_confirmation(&session);
    let Some(action) = confirmation.confirm() else {
        return redirect("/");
    };
    store_confirmation(&session, &confirmation);

    let repo = repo.with_session(&operator);
    match action {
        PendingAction::DeleteUser { id, .. } => after_refetch(
            identity,
            Screen::Users,
            users_service::delete_user(&repo, &id).await,
            "Error deleting user",
        ),
        PendingAction::DeleteFlashcardSet { id, .. } => after_refetch(
            identity,
            Screen::FlashcardSets,
            sets_service::delete_flashcard_set(&repo, id).await,
            "Error deleting flashcard set",
        ),
        PendingAction::DeleteTest { id, .. } => after_refetch(
            identity,
            Screen::Tests,
            tests_service::delete_test(&repo, id).await,
            "Error deleting test",
        ),
        PendingAction::ChangeReportStatus {
            id,
            status,
            cascade,
        } => {
            // The row is patched in place, so the page is rendered from the
            // controller that received the patch.
            let mut list = restore_list::<ContentReport>(
                &session,
                Screen::Reports,
                server_config.default_page_size,
            );
            if let Err(err) = reports_service::load_reports(&repo, &mut list).await {
                if err.is_session_expired() {
                    return end_session(identity);
                }
                log::error!("Failed to load content reports: {err}");
            }

            let notices = match reports_service::change_report_status(&repo, id, status, cascade)
                .await
            {
                Ok(outcome) => settle(&mut list, &ReportsSource::new(&repo), outcome).await,
                Err(err) if err.is_session_expired() => return end_session(identity),
                Err(err) => vec![Notice::error(reports_service::status_failure_message(&err))],
            };

            let context = base_context(&flash_messages, &operator, "reports", &session);
            render_reports(&tera, context, &list, &notices)
        }
    }
}

#[post("/confirm/cancel")]
pub async fn cancel_action(_operator: AdminSession, session: Session) -> impl Responder {
    let mut confirmation = load_confirmation(&session);
    let back = confirmation
        .pending()
        .map(|action| action.screen().path())
        .unwrap_or("/");
    confirmation.cancel();
    store_confirmation(&session, &confirmation);
    redirect(back)
}
