// ============================================================================
// Structure : Notification
// ============================================================================
// Message non bloquant affiché au-dessus du footer.
// Remplace les popups modales : l'utilisateur n'a rien à valider,
// le message disparaît tout seul après quelques secondes.
// ============================================================================

use chrono::{DateTime, Duration, Utc};

/// Niveau d'une notification (détermine la couleur)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    /// Vrai si la notification a dépassé sa durée de vie à l'instant `now`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at >= ttl
    }
}
