use owo_colors::OwoColorize;

use crate::notify::{Notification, Severity};

/// 重要度に応じた色付きプレフィックス
pub fn severity_prefix(severity: Severity) -> String {
    match severity {
        Severity::Success => "✓".green().to_string(),
        Severity::Warning => "•".yellow().to_string(),
        Severity::Error | Severity::Failure => "✗".red().to_string(),
    }
}

/// 通知を1行で表示
pub fn print_notification(notification: &Notification) {
    println!(
        "{} [{}] {}",
        severity_prefix(notification.severity),
        notification.subject,
        notification.message
    );
}

/// 通知のリストを順に表示
pub fn print_notifications(notifications: &[Notification]) {
    for notification in notifications {
        print_notification(notification);
    }
}
