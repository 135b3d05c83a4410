//! Endpoint notifications carried by `conference-notification`.

use super::normalize_enum;

/// What a notification reports about an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationType {
    ConnectFailed,
    IceFailed,
}

impl NotificationType {
    /// Parse a wire literal; `CONNECT_FAILED` and `connect-failed` are
    /// equivalent.
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_enum(value).as_str() {
            "connect-failed" => Some(Self::ConnectFailed),
            "ice-failed" => Some(Self::IceFailed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectFailed => "connect-failed",
            Self::IceFailed => "ice-failed",
        }
    }
}

/// A notification about one endpoint (`<notification>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// The endpoint ID the notification is about. Required.
    pub id: String,
    /// Required.
    pub notification_type: NotificationType,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_separator_styles_parse_to_the_same_variant() {
        assert_eq!(
            NotificationType::parse("connect-failed"),
            Some(NotificationType::ConnectFailed)
        );
        assert_eq!(
            NotificationType::parse("CONNECT_FAILED"),
            Some(NotificationType::ConnectFailed)
        );
        assert_eq!(
            NotificationType::parse("Ice_Failed"),
            Some(NotificationType::IceFailed)
        );
        assert_eq!(NotificationType::parse("expired"), None);
    }
}
