use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::domain::auth::AdminSession;
use crate::forms::auth::LoginForm;
use crate::repository::ApiRepository;
use crate::routes::{AUTH_SESSION_KEY, flash_alerts, redirect, render_template};
use crate::services::auth::{self as auth_service, login_failure_message};

#[get("/login")]
pub async fn show_login(
    operator: Option<AdminSession>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if operator.is_some() {
        return redirect("/");
    }

    let mut context = Context::new();
    context.insert("alerts", &flash_alerts(&flash_messages));
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    request: HttpRequest,
    session: Session,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let operator = match auth_service::login(repo.get_ref(), form).await {
        Ok(operator) => operator,
        Err(err) => {
            FlashMessage::error(login_failure_message(&err)).send();
            return redirect("/login");
        }
    };

    session.renew();
    if let Err(err) = session.insert(AUTH_SESSION_KEY, operator.to_stored()) {
        log::error!("Failed to store the session of {}: {err}", operator.email);
        FlashMessage::error("Login failed. Please try again.").send();
        return redirect("/login");
    }
    if let Err(err) = Identity::login(&request.extensions(), identity_of(&operator)) {
        log::error!("Failed to attach identity for {}: {err}", operator.email);
        session.purge();
        FlashMessage::error("Login failed. Please try again.").send();
        return redirect("/login");
    }

    FlashMessage::success(format!("Welcome, {}.", operator.email)).send();
    redirect("/")
}

fn identity_of(operator: &AdminSession) -> String {
    if operator.user_id.is_empty() {
        operator.email.clone()
    } else {
        operator.user_id.clone()
    }
}

#[post("/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    redirect("/login")
}
