//! 通知
//!
//! オーケストレーターは制御フローに副作用を混ぜず、通知を値として
//! レポートに載せて返す。表示はコマンド層の責務。

/// 通知の重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Failure,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Failure => "failure",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 通知
#[derive(Debug, Clone)]
pub struct Notification {
    pub subject: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(
        subject: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            severity,
        }
    }
}
