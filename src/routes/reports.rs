use actix_identity::Identity;
use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::domain::auth::AdminSession;
use crate::domain::report::ContentReport;
use crate::domain::types::ReportStatus;
use crate::dto::reports::{ReportView, content_type_options, status_options};
use crate::forms::reports::ReportStatusForm;
use crate::listing::mutation::Notice;
use crate::listing::{ListController, ListView};
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{
    ask_confirmation, base_context, end_session, failure_notice, flash_notice, push_notices,
    redirect, render_template, restore_list,
};
use crate::services::ServiceError;
use crate::services::lists::Screen;
use crate::services::reports as reports_service;

/// Context of the reports table for an already loaded controller.
pub fn reports_context(context: &mut Context, list: &ListController<ContentReport>) {
    let rows = list.items().iter().map(ReportView::from).collect::<Vec<_>>();
    context.insert("screen", &Screen::Reports);
    context.insert("list", &ListView::new(list));
    context.insert("rows", &rows);
    context.insert("sort_fields", Screen::Reports.sort_fields());
    context.insert("status_options", &status_options());
    context.insert("content_type_options", &content_type_options());
}

/// Renders the reports screen with `notices` shown inline.
pub fn render_reports(
    tera: &Tera,
    mut context: Context,
    list: &ListController<ContentReport>,
    notices: &[Notice],
) -> actix_web::HttpResponse {
    reports_context(&mut context, list);
    push_notices(&mut context, notices);
    render_template(tera, "reports/index.html", &context)
}

#[get("/reports")]
pub async fn show_reports(
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
        restore_list::<ContentReport>(&session, Screen::Reports, server_config.default_page_size);

    if let Err(err) = reports_service::load_reports(&repo, &mut list).await {
        if err.is_session_expired() {
            return end_session(identity);
        }
        log::error!("Failed to load content reports: {err}");
    }

    let context = base_context(&flash_messages, &operator, "reports", &session);
    render_reports(&tera, context, &list, &[])
}

#[get("/reports/{report_id}")]
pub async fn show_report(
    report_id: web::Path<i32>,
    operator: AdminSession,
    identity: Identity,
    session: Session,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let repo = repo.with_session(&operator);
    match reports_service::load_report(&repo, report_id.into_inner()).await {
        Ok(report) => {
            let mut context = base_context(&flash_messages, &operator, "reports", &session);
            context.insert("report", &ReportView::from(&report));
            render_template(&tera, "reports/detail.html", &context)
        }
        Err(err) if err.is_session_expired() => end_session(identity),
        Err(ServiceError::NotFound) => {
            flash_notice(Notice::error("Report not found."));
            redirect("/reports")
        }
        Err(err) => {
            flash_notice(failure_notice(&err, "Failed to load report."));
            redirect("/reports")
        }
    }
}

#[post("/reports/{report_id}/status")]
pub async fn request_status_change(
    report_id: web::Path<i32>,
    operator: AdminSession,
    identity: Identity,
    session: Session,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<ReportStatusForm>,
) -> impl Responder {
    let status = match ReportStatus::try_from(form) {
        Ok(status) => status,
        Err(err) => {
            flash_notice(failure_notice(&ServiceError::from(err), "Invalid report status value."));
            return redirect("/reports");
        }
    };

    let repo = repo.with_session(&operator);
    match reports_service::prepare_status_change(&repo, report_id.into_inner(), status).await {
        Ok(action) => ask_confirmation(&session, action),
        Err(err) if err.is_session_expired() => end_session(identity),
        Err(err) => {
            flash_notice(Notice::error(reports_service::status_failure_message(&err)));
            redirect("/reports")
        }
    }
}
