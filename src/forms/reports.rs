use serde::Deserialize;

use crate::domain::types::ReportStatus;
use crate::forms::FormError;

/// Approve/reject buttons on the reports table and detail page.
#[derive(Debug, Deserialize)]
pub struct ReportStatusForm {
    /// Numeric code or name.
    pub status: String,
}

impl TryFrom<ReportStatusForm> for ReportStatus {
    type Error = FormError;

    fn try_from(form: ReportStatusForm) -> Result<Self, Self::Error> {
        form.status.parse().map_err(|_| FormError::InvalidStatus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accepts_codes_and_names() {
        let approve = ReportStatusForm {
            status: "1".into(),
        };
        let reject = ReportStatusForm {
            status: "Rejected".into(),
        };
        assert_eq!(ReportStatus::try_from(approve).unwrap(), ReportStatus::Approved);
        assert_eq!(ReportStatus::try_from(reject).unwrap(), ReportStatus::Rejected);
        assert!(ReportStatus::try_from(ReportStatusForm { status: "7".into() }).is_err());
    }
}
