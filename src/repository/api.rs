//! REST implementation of the repository traits.
//!
//! One [`ApiRepository`] is built at start-up without credentials; handlers
//! derive a per-request copy carrying the operator's bearer token through
//! [`ApiRepository::with_session`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, SecretBox};
use serde::de::DeserializeOwned;

use crate::domain::auth::{AdminSession, Credentials};
use crate::domain::flashcard_set::FlashcardSet;
use crate::domain::multiple_choice::MultipleChoiceTest;
use crate::domain::report::ContentReport;
use crate::domain::types::{
    FlashcardSetId, ReportId, ReportStatus, TestId, TypeConstraintError, UserId,
};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::listing::RawPage;
use crate::models::auth::LoginResponse;
use crate::models::content::{
    ContentPage, FlashcardSet as FlashcardSetModel, MultipleChoiceTest as MultipleChoiceTestModel,
};
use crate::models::config::ServerConfig;
use crate::models::report::{ContentReport as ContentReportModel, ReportPage};
use crate::models::user::{User as UserModel, UserPage, UserPayload};
use crate::repository::errors::{RepositoryError, RepositoryResult, extract_message};
use crate::repository::{
    AuthGateway, ContentListQuery, FlashcardSetReader, FlashcardSetWriter, Pagination,
    ReportListQuery, ReportReader, ReportWriter, TestReader, TestWriter, UserListQuery,
    UserReader, UserWriter,
};

type QueryParams = Vec<(&'static str, String)>;

#[derive(Clone)]
pub struct ApiRepository {
    client: Client,
    base_url: Arc<Url>,
    token: Option<Arc<SecretBox<String>>>,
}

impl ApiRepository {
    pub fn new(base_url: &str, timeout: Duration) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("HTTP client: {e}")))?;
        let base_url = Url::parse(base_url)
            .map_err(|e| RepositoryError::Unexpected(format!("backend URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RepositoryError::Unexpected(format!(
                "backend URL '{base_url}' cannot hold a path"
            )));
        }
        Ok(Self {
            client,
            base_url: Arc::new(base_url),
            token: None,
        })
    }

    pub fn from_config(config: &ServerConfig) -> RepositoryResult<Self> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.api_timeout_secs),
        )
    }

    /// Copy of this repository that authenticates as `session`.
    pub fn with_session(&self, session: &AdminSession) -> Self {
        Self {
            client: self.client.clone(),
            base_url: Arc::clone(&self.base_url),
            token: Some(Arc::new(SecretBox::new(Box::new(
                session.token.expose_secret().clone(),
            )))),
        }
    }

    /// Endpoint below the base URL. Every segment is percent-encoded, so an
    /// identifier can never leave its own segment.
    fn url(&self, segments: &[&str]) -> RepositoryResult<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|segment| matches!(segment.trim(), "" | "." | ".."))
        {
            return Err(RepositoryError::Unexpected(format!(
                "invalid path segment '{bad}'"
            )));
        }
        let mut url = Url::clone(&self.base_url);
        url.path_segments_mut()
            .map_err(|()| RepositoryError::Unexpected("backend URL cannot hold a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, builder: RequestBuilder) -> RepositoryResult<Response> {
        let builder = match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        };
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = RepositoryError::from_status(status.as_u16(), &body);
        log::warn!("Backend answered {status}: {err}");
        Err(err)
    }

    /// Decodes a list body; a shape the console does not recognise is an empty page.
    async fn list_body<T>(&self, path: &[&str], query: &QueryParams) -> RepositoryResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let url = self.url(path)?;
        let response = self.send(self.client.get(url.clone()).query(query)).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            log::warn!("Unexpected list shape from {}: {e}", url.path());
            T::default()
        }))
    }

    async fn get_optional<T>(&self, path: &[&str]) -> RepositoryResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.send(self.client.get(self.url(path)?)).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn delete(&self, path: &[&str]) -> RepositoryResult<()> {
        self.send(self.client.delete(self.url(path)?)).await?;
        Ok(())
    }
}

fn pagination_params(pagination: Option<Pagination>, page_key: &'static str) -> QueryParams {
    pagination
        .map(|p| {
            vec![
                (page_key, p.page.to_string()),
                ("itemPerPage", p.per_page.to_string()),
            ]
        })
        .unwrap_or_default()
}

fn push_non_empty(params: &mut QueryParams, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        params.push((key, value.to_string()));
    }
}

pub(crate) fn user_list_params(query: &UserListQuery) -> QueryParams {
    let mut params = pagination_params(query.pagination, "page");
    push_non_empty(&mut params, "emailUser", query.email.as_deref());
    push_non_empty(&mut params, "roleFilter", query.role.as_deref());
    params
}

pub(crate) fn report_list_params(query: &ReportListQuery) -> QueryParams {
    let mut params = pagination_params(query.pagination, "currentPage");
    if let Some(report_id) = query.report_id {
        params.push(("reportId", report_id.to_string()));
    }
    push_non_empty(&mut params, "userId", query.user_id.as_deref());
    if let Some(content_type) = query.content_type {
        params.push(("contentType", content_type.code().to_string()));
    }
    if let Some(status) = query.status {
        params.push(("status", status.code().to_string()));
    }
    push_non_empty(&mut params, "sortBy", query.sort_by.as_deref());
    if let Some(is_desc) = query.is_desc {
        params.push(("isDesc", is_desc.to_string()));
    }
    params
}

/// Converts wire rows, dropping the ones that violate domain invariants.
fn convert_items<W, D>(items: Vec<W>, what: &str) -> Vec<D>
where
    D: TryFrom<W, Error = TypeConstraintError>,
{
    items
        .into_iter()
        .filter_map(|item| match D::try_from(item) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("Skipping malformed {what}: {e}");
                None
            }
        })
        .collect()
}

fn content_path<'a>(resource: &'a str, query: &'a ContentListQuery) -> Vec<&'a str> {
    match query.user_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        Some(user_id) => vec!["api", resource, "GetAll", user_id],
        None => vec!["api", resource, "Explore"],
    }
}

#[async_trait]
impl AuthGateway for ApiRepository {
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<AdminSession> {
        let response = self
            .send(self.client.post(self.url(&["Auth", "login"])?).json(credentials))
            .await?;
        let body: LoginResponse = response.json().await?;
        body.into_session(&credentials.email)
            .ok_or_else(|| RepositoryError::Unexpected("login response without a token".into()))
    }
}

#[async_trait]
impl UserReader for ApiRepository {
    async fn list_users(&self, query: UserListQuery) -> RepositoryResult<RawPage<User>> {
        let page: UserPage = self
            .list_body(&["Auth", "get-all-user"], &user_list_params(&query))
            .await?;
        Ok(RawPage::new(convert_items(page.infor_users, "user"))
            .total_count(page.total_count)
            .total_pages(page.total_page)
            .items_per_page(page.item_per_page))
    }

    async fn get_user_by_id(&self, id: &UserId) -> RepositoryResult<Option<User>> {
        let user: Option<UserModel> = self.get_optional(&["api", "users", id.as_str()]).await?;
        user.map(User::try_from)
            .transpose()
            .map_err(|e| RepositoryError::Unexpected(e.to_string()))
    }
}

#[async_trait]
impl UserWriter for ApiRepository {
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<()> {
        let payload = UserPayload::from(user);
        self.send(self.client.post(self.url(&["api", "users"])?).json(&payload))
            .await?;
        Ok(())
    }

    async fn register_admin(&self, user: &NewUser) -> RepositoryResult<()> {
        let payload = UserPayload::from(user);
        self.send(
            self.client
                .post(self.url(&["Auth", "register-admin"])?)
                .json(&payload),
        )
        .await?;
        Ok(())
    }

    async fn update_user(&self, id: &UserId, updates: &UpdateUser) -> RepositoryResult<()> {
        let payload = UserPayload::from(updates);
        self.send(
            self.client
                .put(self.url(&["api", "users", id.as_str()])?)
                .json(&payload),
        )
        .await?;
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> RepositoryResult<()> {
        self.delete(&["api", "users", id.as_str()]).await
    }
}

#[async_trait]
impl ReportReader for ApiRepository {
    async fn list_reports(
        &self,
        query: ReportListQuery,
    ) -> RepositoryResult<RawPage<ContentReport>> {
        let page: ReportPage = self
            .list_body(
                &["api", "ContentReport", "GetAllReport"],
                &report_list_params(&query),
            )
            .await?;
        Ok(RawPage::new(convert_items(page.content_reports, "report"))
            .total_count(page.total_count)
            .total_pages(page.total_pages)
            .items_per_page(page.item_per_page))
    }

    async fn get_report_by_id(&self, id: ReportId) -> RepositoryResult<Option<ContentReport>> {
        let report: Option<ContentReportModel> = self
            .get_optional(&["api", "ContentReport", &id.to_string()])
            .await?;
        report
            .map(ContentReport::try_from)
            .transpose()
            .map_err(|e| RepositoryError::Unexpected(e.to_string()))
    }
}

#[async_trait]
impl ReportWriter for ApiRepository {
    async fn set_report_status(
        &self,
        id: ReportId,
        status: ReportStatus,
    ) -> RepositoryResult<Option<String>> {
        let response = self
            .send(
                self.client
                    .put(self.url(&["api", "ContentReport", "ApproveReport", &id.to_string()])?)
                    .query(&[("reportStatus", status.code().to_string())]),
            )
            .await?;
        let body = response.text().await.unwrap_or_default();
        Ok(extract_message(&body))
    }
}

#[async_trait]
impl FlashcardSetReader for ApiRepository {
    async fn list_flashcard_sets(
        &self,
        query: ContentListQuery,
    ) -> RepositoryResult<RawPage<FlashcardSet>> {
        let params = pagination_params(query.pagination, "page");
        let page: ContentPage<FlashcardSetModel> = self
            .list_body(&content_path("FlashCardSet", &query), &params)
            .await?;
        let page = page.into_envelope();
        Ok(RawPage::new(convert_items(page.items, "flashcard set"))
            .total_count(page.total_count)
            .total_pages(page.total_pages)
            .items_per_page(page.item_per_page))
    }
}

#[async_trait]
impl FlashcardSetWriter for ApiRepository {
    async fn delete_flashcard_set(&self, id: FlashcardSetId) -> RepositoryResult<()> {
        self.delete(&["api", "FlashCardSet", &id.to_string()]).await
    }
}

#[async_trait]
impl TestReader for ApiRepository {
    async fn list_tests(
        &self,
        query: ContentListQuery,
    ) -> RepositoryResult<RawPage<MultipleChoiceTest>> {
        let params = pagination_params(query.pagination, "page");
        let page: ContentPage<MultipleChoiceTestModel> = self
            .list_body(&content_path("MultipleChoiceTest", &query), &params)
            .await?;
        let page = page.into_envelope();
        Ok(RawPage::new(convert_items(page.items, "multiple-choice test"))
            .total_count(page.total_count)
            .total_pages(page.total_pages)
            .items_per_page(page.item_per_page))
    }
}

#[async_trait]
impl TestWriter for ApiRepository {
    async fn delete_test(&self, id: TestId) -> RepositoryResult<()> {
        self.delete(&["api", "MultipleChoiceTest", &id.to_string()]).await
    }
}
