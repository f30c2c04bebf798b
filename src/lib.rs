// ============================================================================
// Wazito Coin - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod config;    // Configuration (fichier JSON)
pub mod error;     // Erreurs métier typées
pub mod models;    // Structures de données
pub mod app;       // État de l'application
pub mod ui;        // Interface utilisateur
