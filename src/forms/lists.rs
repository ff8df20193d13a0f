//! Controls shared by every listing screen.

use serde::Deserialize;

use crate::listing::Filters;
use crate::services::lists::Screen;

/// Filter inputs as submitted; names are checked against the screen.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct FilterForm(pub Vec<(String, String)>);

impl FilterForm {
    /// Reads a urlencoded request body.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_html_form::de::Error> {
        serde_html_form::from_bytes(body)
    }

    pub fn into_filters(self, screen: Screen) -> Filters {
        screen.accept_filters(self.0.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

#[derive(Debug, Deserialize)]
pub struct PageForm {
    /// 0-based.
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct PageSizeForm {
    pub size: usize,
}

#[derive(Debug, Deserialize)]
pub struct SortForm {
    pub field: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_form_keeps_blank_values_as_empty() {
        let form: FilterForm =
            serde_html_form::from_str("reportId=&status=1&contentType=Lesson&other=x").unwrap();
        let filters = form.into_filters(Screen::Reports);

        assert!(filters.get("reportId").is_some_and(|v| v.is_empty()));
        assert_eq!(filters.number("status"), Some(1));
        assert_eq!(filters.query_value("contentType").as_deref(), Some("Lesson"));
        assert!(filters.get("other").is_none());
    }

    #[test]
    fn filter_form_reads_encoded_body() {
        let form = FilterForm::from_body(b"email=ann%40wordwise.com&role=Admin&role=User").unwrap();
        let filters = form.into_filters(Screen::Users);

        assert_eq!(
            filters.query_value("email").as_deref(),
            Some("ann@wordwise.com")
        );
        assert!(filters.get("role").is_some());
    }

    #[test]
    fn empty_body_is_an_empty_form() {
        let form = FilterForm::from_body(b"").unwrap();

        assert!(form.0.is_empty());
    }
}
