//! Client error types.
//!
//! [`ClientError`] collects everything a page action can fail with and
//! [`Notice`] is what the user gets to see about it.

use filmbudget_core::budget::BudgetError;
use filmbudget_core::grid::GridError;
use filmbudget_core::tax::TaxError;
use filmbudget_shared::{AppError, FailureKind};
use thiserror::Error;

/// Result type alias using `ClientError`.
pub type ClientResult<T> = Result<T, ClientError>;

/// Token persistence errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Token file could not be read or written.
    #[error("Token store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Token file exists but does not hold a token pair.
    #[error("Token store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors raised by API calls and page controllers.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Backend answered with an error status.
    #[error(transparent)]
    Api(#[from] AppError),

    /// Request could not be sent or its body could not be read.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a body the client does not understand.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// No valid session; the user has to log in again.
    #[error("Login required")]
    LoginRequired,

    /// Token store failure.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Form did not pass local validation.
    #[error("{0}")]
    Validation(#[from] garde::Report),

    /// Form fields contradict each other.
    #[error("{0}")]
    Invalid(String),

    /// Tax input rejected.
    #[error(transparent)]
    Tax(#[from] TaxError),

    /// Budget tree could not be evaluated.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// Grid edit rejected.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Owning view was closed before the request finished.
    #[error("Request cancelled")]
    Cancelled,

    /// Local file could not be written.
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Recovery class of this error.
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Api(e) => e.kind(),
            Self::LoginRequired => FailureKind::Auth,
            Self::Validation(_)
            | Self::Invalid(_)
            | Self::Tax(_)
            | Self::Grid(_)
            | Self::Budget(BudgetError::InvalidTax { .. } | BudgetError::UnknownUnit(_)) => {
                FailureKind::Validation
            }
            Self::Http(_)
            | Self::Decode(_)
            | Self::Session(_)
            | Self::Budget(_)
            | Self::Cancelled
            | Self::Io(_) => FailureKind::Transient,
        }
    }

    /// User-facing message for this error.
    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::from(self)
    }
}

/// Message shown to the user after a failed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Recovery class.
    pub kind: FailureKind,
    /// Short heading.
    pub title: &'static str,
    /// Details.
    pub message: String,
}

impl From<&ClientError> for Notice {
    fn from(error: &ClientError) -> Self {
        let kind = error.failure_kind();
        let title = match kind {
            FailureKind::Auth => "Сессия истекла, войдите снова",
            FailureKind::Validation => "Проверьте введённые данные",
            FailureKind::Transient => "Не удалось выполнить запрос, обновите страницу",
        };
        Self {
            kind,
            title,
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmbudget_shared::types::LineId;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case(ClientError::Api(AppError::Unauthorized("expired".into())), FailureKind::Auth)]
    #[case(ClientError::LoginRequired, FailureKind::Auth)]
    #[case(ClientError::Api(AppError::Validation("bad".into())), FailureKind::Validation)]
    #[case(ClientError::Invalid("dates".into()), FailureKind::Validation)]
    #[case(ClientError::Grid(GridError::EmptyName), FailureKind::Validation)]
    #[case(ClientError::Api(AppError::Server("boom".into())), FailureKind::Transient)]
    #[case(ClientError::Decode("eof".into()), FailureKind::Transient)]
    #[case(ClientError::Cancelled, FailureKind::Transient)]
    #[case(
        ClientError::Budget(BudgetError::InvalidTax {
            line: LineId::new(),
            source: TaxError::PercentOutOfRange(Decimal::from(120)),
        }),
        FailureKind::Validation
    )]
    #[case(ClientError::Budget(BudgetError::Cycle(uuid::Uuid::nil())), FailureKind::Transient)]
    fn test_failure_kind(#[case] error: ClientError, #[case] expected: FailureKind) {
        assert_eq!(error.failure_kind(), expected);
    }

    #[test]
    fn test_notice_carries_message() {
        let notice = ClientError::Invalid("Дата окончания раньше даты начала".into()).notice();

        assert_eq!(notice.kind, FailureKind::Validation);
        assert_eq!(notice.message, "Дата окончания раньше даты начала");
        assert!(notice.to_string().starts_with(notice.title));
    }
}
