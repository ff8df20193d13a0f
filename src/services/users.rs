//! User administration.

use async_trait::async_trait;

use crate::domain::auth::AdminSession;
use crate::domain::types::UserId;
use crate::domain::user::User;
use crate::dto::users::UserFormData;
use crate::forms::users::{SaveUserForm, SaveUserPayload};
use crate::listing::mutation::{MutationOutcome, Notice, Reconcile};
use crate::listing::{ListController, PageRequest, PageSource, RawPage};
use crate::repository::errors::RepositoryResult;
use crate::repository::{UserListQuery, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, fetch_into};

/// Maps the users screen's filters to a backend query.
pub fn user_query(request: &PageRequest) -> UserListQuery {
    let mut query = UserListQuery::new().paginate(request.page_number(), request.page_size);
    if let Some(email) = request.filters.query_value("email") {
        query = query.email(email);
    }
    if let Some(role) = request.filters.query_value("role") {
        query = query.role(role);
    }
    query
}

pub struct UsersSource<'a, R: ?Sized> {
    repo: &'a R,
}

impl<'a, R: ?Sized> UsersSource<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> PageSource<User> for UsersSource<'_, R>
where
    R: UserReader + ?Sized,
{
    async fn fetch_page(&self, request: &PageRequest) -> RepositoryResult<RawPage<User>> {
        self.repo.list_users(user_query(request)).await
    }
}

/// Fills `list` with the current page of users.
pub async fn load_users<R>(repo: &R, list: &mut ListController<User>) -> ServiceResult<()>
where
    R: UserReader + ?Sized,
{
    fetch_into(list, &UsersSource::new(repo), "users").await
}

/// Data for the add (`id = None`) or edit dialog.
pub async fn load_user_form<R>(
    repo: &R,
    session: &AdminSession,
    id: Option<&str>,
) -> ServiceResult<UserFormData>
where
    R: UserReader + ?Sized,
{
    let user = match id {
        None => None,
        Some(id) => {
            let id = UserId::new(id)?;
            let user = repo.get_user_by_id(&id).await.map_err(|err| {
                log::error!("Failed to load user {id}: {err}");
                err
            })?;
            Some(user.ok_or(ServiceError::NotFound)?)
        }
    };
    Ok(UserFormData::new(user, session.is_super_admin()))
}

/// Creates or updates an account. The list catches up by re-fetching.
pub async fn save_user<R>(
    repo: &R,
    session: &AdminSession,
    form: SaveUserForm,
) -> ServiceResult<MutationOutcome<User>>
where
    R: UserWriter + ?Sized,
{
    let payload = SaveUserPayload::try_from(form)?;

    let message = match payload {
        SaveUserPayload::Update(id, updates) => {
            repo.update_user(&id, &updates).await.map_err(|err| {
                log::error!("Failed to update user {id}: {err}");
                err
            })?;
            "User updated successfully"
        }
        SaveUserPayload::Create(user) if user.is_privileged() => {
            if !session.is_super_admin() {
                return Err(ServiceError::Form(
                    "Only a SuperAdmin can create administrator accounts.".to_string(),
                ));
            }
            repo.register_admin(&user).await.map_err(|err| {
                log::error!("Failed to register admin {}: {err}", user.email);
                err
            })?;
            "Admin user created successfully"
        }
        SaveUserPayload::Create(user) => {
            repo.create_user(&user).await.map_err(|err| {
                log::error!("Failed to create user {}: {err}", user.email);
                err
            })?;
            "User created successfully"
        }
    };

    Ok(MutationOutcome::new(
        Notice::success(message),
        Reconcile::Refetch,
    ))
}

pub async fn delete_user<R>(repo: &R, id: &str) -> ServiceResult<MutationOutcome<User>>
where
    R: UserWriter + ?Sized,
{
    let id = UserId::new(id)?;
    repo.delete_user(&id).await.map_err(|err| {
        log::error!("Failed to delete user {id}: {err}");
        err
    })?;
    Ok(MutationOutcome::new(
        Notice::success("User deleted successfully"),
        Reconcile::Refetch,
    ))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::listing::{FilterValue, Filters};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn session(roles: &[&str]) -> AdminSession {
        AdminSession::new(
            "token".to_string(),
            None,
            "op".to_string(),
            "op@wordwise.com".to_string(),
            roles.iter().map(|r| r.to_string()).collect(),
        )
    }

    fn form(roles: &[&str]) -> SaveUserForm {
        SaveUserForm {
            user_name: "ann".into(),
            email: "ann@wordwise.com".into(),
            password: "Secr3t!".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            ..SaveUserForm::default()
        }
    }

    fn user(id: &str) -> User {
        User {
            id: UserId::new(id).unwrap(),
            user_name: "ann".into(),
            email: "ann@wordwise.com".into(),
            roles: vec!["User".into()],
            gender: true,
            level: 1,
        }
    }

    #[test]
    fn query_uses_one_based_page_and_skips_blank_filters() {
        let request = PageRequest {
            page_index: 0,
            page_size: 20,
            filters: Filters::new()
                .with("email", FilterValue::Empty)
                .with("role", FilterValue::Text("Admin".into())),
        };

        let query = user_query(&request);

        assert_eq!(query.pagination.map(|p| p.page), Some(1));
        assert_eq!(query.email, None);
        assert_eq!(query.role.as_deref(), Some("Admin"));
    }

    #[actix_web::test]
    async fn load_users_fills_list() {
        let mut repo = MockRepository::new();
        repo.expect_list_users()
            .times(1)
            .returning(|_| Ok(RawPage::new(vec![user("a"), user("b")]).total_pages(Some(1))));
        let mut list = ListController::new(20);

        load_users(&repo, &mut list).await.expect("should load");

        assert_eq!(list.items().len(), 2);
        assert!(list.total().is_approximate());
    }

    #[actix_web::test]
    async fn expired_token_is_surfaced() {
        let mut repo = MockRepository::new();
        repo.expect_list_users()
            .returning(|_| Err(RepositoryError::Unauthenticated));
        let mut list: ListController<User> = ListController::new(20);

        let result = load_users(&repo, &mut list).await;

        assert!(result.is_err_and(|err| err.is_session_expired()));
        assert!(list.items().is_empty());
    }

    #[actix_web::test]
    async fn other_fetch_failures_stay_in_the_list() {
        let mut repo = MockRepository::new();
        repo.expect_list_users()
            .returning(|_| Err(RepositoryError::Network("down".into())));
        let mut list: ListController<User> = ListController::new(20);

        load_users(&repo, &mut list).await.expect("failure is not fatal");

        assert!(list.error().is_some());
    }

    #[actix_web::test]
    async fn plain_user_goes_through_users_endpoint() {
        let mut repo = MockRepository::new();
        repo.expect_create_user().times(1).returning(|_| Ok(()));
        repo.expect_register_admin().times(0);

        let outcome = save_user(&repo, &session(&["Admin"]), form(&["User"]))
            .await
            .expect("should create");

        assert_eq!(outcome.notices, vec![Notice::success("User created successfully")]);
        assert!(matches!(outcome.reconcile, Reconcile::Refetch));
    }

    #[actix_web::test]
    async fn admin_account_requires_super_admin() {
        let mut repo = MockRepository::new();
        repo.expect_register_admin().times(0);
        repo.expect_create_user().times(0);

        let result = save_user(&repo, &session(&["Admin"]), form(&["Admin"])).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn super_admin_registers_admins() {
        let mut repo = MockRepository::new();
        repo.expect_register_admin()
            .withf(|user| user.is_privileged())
            .times(1)
            .returning(|_| Ok(()));

        let outcome = save_user(&repo, &session(&["SuperAdmin"]), form(&["Admin"]))
            .await
            .expect("should register");

        assert_eq!(outcome.notices[0].message, "Admin user created successfully");
    }

    #[actix_web::test]
    async fn weak_password_never_reaches_backend() {
        let mut repo = MockRepository::new();
        repo.expect_create_user().times(0);
        let mut weak = form(&["User"]);
        weak.password = "abc".into();

        let result = save_user(&repo, &session(&["Admin"]), weak).await;

        assert!(result.is_err_and(|err| err.is_validation()));
    }

    #[actix_web::test]
    async fn edit_form_for_missing_user_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(None));

        let result = load_user_form(&repo, &session(&["Admin"]), Some("gone")).await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn delete_reports_backend_message() {
        let mut repo = MockRepository::new();
        repo.expect_delete_user().returning(|_| {
            Err(RepositoryError::from_status(
                400,
                r#"{"message":"Cannot delete yourself"}"#,
            ))
        });

        let err = delete_user(&repo, "op").await.unwrap_err();

        assert_eq!(err.user_message("Error deleting user"), "Cannot delete yourself");
    }
}
