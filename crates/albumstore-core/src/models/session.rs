use serde::{Deserialize, Serialize};

/// Album title used when a paid session carries none.
pub const DEFAULT_ALBUM_TITLE: &str = "Album";

/// Payment state reported by the payment provider for a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    NoPaymentRequired,
    Other(String),
}

impl PaymentStatus {
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::NoPaymentRequired => "no_payment_required",
            PaymentStatus::Other(s) => s,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "paid" => PaymentStatus::Paid,
            "unpaid" => PaymentStatus::Unpaid,
            "no_payment_required" => PaymentStatus::NoPaymentRequired,
            _ => PaymentStatus::Other(value),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Metadata attached to a checkout session when it was created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(rename = "albumTitle", default)]
    pub album_title: Option<String>,
    #[serde(rename = "downloadPath", default)]
    pub download_path: Option<String>,
}

/// A checkout session as seen by this system. Never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSession {
    pub id: String,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub metadata: SessionMetadata,
}

impl PaymentSession {
    /// Album title from metadata, falling back to [`DEFAULT_ALBUM_TITLE`].
    pub fn album_title(&self) -> &str {
        self.metadata
            .album_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_ALBUM_TITLE)
    }

    /// Storage prefix the purchase entitles to. An empty path counts as absent.
    pub fn download_prefix(&self) -> Option<&str> {
        self.metadata
            .download_path
            .as_deref()
            .filter(|p| !p.is_empty())
    }
}
