use crate::{
    config::AppConfig,
    errors::{ApiError, FieldError},
    repositories::{ListQuery, Page},
};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::Validate;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// JSON body that has been deserialized and validated. A body that cannot be
/// read as `T` is reported the same way as a failed rule: 400 with `errors`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(body_rejection)?;
        value.validate()?;
        Ok(Self(value))
    }
}

fn body_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::Validation(vec![FieldError::new("body", rejection.body_text())])
}

/// Query string accepted by every list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: u64,
    pub per_page: Option<u64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub product_id: Option<i32>,
    pub provider_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub category_id: Option<i32>,
    pub role_id: Option<i32>,
}

fn default_page() -> u64 {
    1
}

impl ListParams {
    /// Applies the configured default page size and caps it at the maximum
    pub fn to_query(&self, config: &AppConfig) -> ListQuery {
        let max = config.api_max_page_size.max(1);
        let per_page = self
            .per_page
            .unwrap_or(config.api_default_page_size)
            .clamp(1, max);

        ListQuery {
            page: self.page.max(1),
            per_page,
            search: self.search.clone(),
            status: self.status.clone(),
        }
    }
}

/// Standard pagination response metadata
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if total == 0 || per_page == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

/// Standard paginated response wrapper
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(page, per_page, total),
        }
    }

    pub fn from_page(page: Page<T>, query: &ListQuery) -> Self {
        Self::new(page.items, query.page, query.per_page, page.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 20, 0)]
    #[case(1, 20, 1)]
    #[case(20, 20, 1)]
    #[case(21, 20, 2)]
    fn total_pages(#[case] total: u64, #[case] per_page: u64, #[case] expected: u64) {
        assert_eq!(PaginationMeta::new(1, per_page, total).total_pages, expected);
    }

    #[test]
    fn page_size_is_defaulted_and_capped() {
        let config = AppConfig::new(
            "sqlite::memory:".into(),
            "x".repeat(64),
            3600,
            "127.0.0.1".into(),
            8080,
            "test".into(),
        );

        let defaulted = ListParams {
            page: 0,
            ..Default::default()
        }
        .to_query(&config);
        assert_eq!(defaulted.page, 1);
        assert_eq!(defaulted.per_page, config.api_default_page_size);

        let capped = ListParams {
            page: 2,
            per_page: Some(10_000),
            ..Default::default()
        }
        .to_query(&config);
        assert_eq!(capped.per_page, config.api_max_page_size);
    }
}
