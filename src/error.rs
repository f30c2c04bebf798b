// ============================================================================
// Erreurs métier
// ============================================================================
// Toutes les erreurs de validation sont locales et récupérables :
// elles sont renvoyées à la couche de présentation qui les affiche
// sous forme de notification (pas de popup bloquante).
//
// CONCEPT RUST : thiserror
// - #[derive(Error)] implémente std::error::Error
// - #[error("...")] génère l'implémentation de Display
// ============================================================================

use thiserror::Error;

/// Erreurs renvoyées par les transitions de la session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Nom d'utilisateur ou mot de passe vide à la connexion
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Montant de dépôt nul, négatif ou illisible
    #[error("Please enter a valid amount")]
    InvalidAmount,

    /// Retrait supérieur au solde (ou montant <= 0)
    #[error("Insufficient balance or invalid amount")]
    InsufficientFunds,

    /// Champ vide à l'inscription
    #[error("Username and password are required")]
    InvalidInput,
}

/// Erreurs du carnet d'offres
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OfferError {
    #[error("an offer with id={id} not found")]
    NotFound { id: u64 },

    #[error("invalid offer: {msg}")]
    Invalid { msg: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_alert_texts() {
        assert_eq!(
            SessionError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
        assert_eq!(
            SessionError::InsufficientFunds.to_string(),
            "Insufficient balance or invalid amount"
        );
        assert_eq!(
            OfferError::NotFound { id: 7 }.to_string(),
            "an offer with id=7 not found"
        );
    }
}
