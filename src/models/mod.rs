// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application :
// la session (cœur de l'état), les offres, les ordres et les notifications
// ============================================================================

pub mod feature;      // Panneaux sélectionnables (fichier feature.rs)
pub mod notification; // Messages non bloquants (fichier notification.rs)
pub mod offer;        // Carnet d'offres en mémoire (fichier offer.rs)
pub mod order;        // Demandes d'achat / vente (fichier order.rs)
pub mod session;      // État de session (fichier session.rs)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use wazito::models::session::Session;
// On peut faire : use wazito::models::Session;
pub use feature::Feature;
pub use notification::{Notification, NotificationLevel};
pub use offer::{Offer, OfferBook, OfferPayload};
pub use order::{OrderRequest, OrderSide};
pub use session::{Session, LOGIN_BALANCE};
