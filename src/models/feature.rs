// ============================================================================
// Enum : Feature
// ============================================================================
// Panneau de contenu sélectionné depuis le header
//
// CONCEPT RUST : Enum fermé au lieu d'une chaîne de caractères
// - Seules les valeurs connues existent
// - Le match du rendu est exhaustif
// ============================================================================

/// Panneaux sélectionnables depuis le header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    CreateOffer,
    Wallet,
    BecomeVendor,
    Dashboard,
}

impl Feature {
    /// Panneaux visibles dans le header quel que soit l'état de connexion
    pub const PUBLIC: [Feature; 3] = [Feature::CreateOffer, Feature::Wallet, Feature::BecomeVendor];

    /// Titre affiché dans le header et en tête du panneau
    pub fn title(&self) -> &'static str {
        match self {
            Feature::CreateOffer => "Create Offer",
            Feature::Wallet => "Wallet",
            Feature::BecomeVendor => "Become a Vendor",
            Feature::Dashboard => "Dashboard",
        }
    }

    /// Vrai si l'entrée n'apparaît dans le header qu'une fois connecté
    pub fn requires_login(&self) -> bool {
        matches!(self, Feature::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(Feature::BecomeVendor.title(), "Become a Vendor");
        assert_eq!(Feature::CreateOffer.title(), "Create Offer");
    }

    #[test]
    fn test_only_dashboard_requires_login() {
        assert!(Feature::Dashboard.requires_login());
        assert!(Feature::PUBLIC.iter().all(|f| !f.requires_login()));
    }
}
