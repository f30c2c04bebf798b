// ============================================================================
// Structure : Session
// ============================================================================
// État de vue mutable de l'application : utilisateur courant, solde du
// portefeuille, panneau actif et visibilité des formulaires de connexion.
//
// CONCEPTS RUST :
// 1. Champs privés + accesseurs : l'exclusion mutuelle des deux formulaires
//    ne peut être cassée que depuis ce module
// 2. Result<(), SessionError> : les échecs de validation sont des valeurs,
//    l'appelant décide comment les afficher
// 3. Aucune I/O : chaque transition est synchrone et atomique
// ============================================================================

use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::models::{Feature, OrderRequest, OrderSide};

/// Solde attribué à chaque connexion réussie
pub const LOGIN_BALANCE: f64 = 1000.0;

/// Session de l'utilisateur (une seule instance, possédée par App)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    /// Présent si et seulement si un utilisateur est connecté
    user: Option<String>,

    /// Solde simulé, sans plancher
    wallet_balance: f64,

    /// Panneau affiché sous le dashboard (routage d'affichage uniquement)
    active_feature: Option<Feature>,

    login_form_visible: bool,
    signup_form_visible: bool,
}

impl Session {
    /// Session initiale : personne de connecté, solde à 0, rien d'affiché
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn wallet_balance(&self) -> f64 {
        self.wallet_balance
    }

    pub fn active_feature(&self) -> Option<Feature> {
        self.active_feature
    }

    pub fn is_login_form_visible(&self) -> bool {
        self.login_form_visible
    }

    pub fn is_signup_form_visible(&self) -> bool {
        self.signup_form_visible
    }

    // ========================================================================
    // Authentification (simulée)
    // ========================================================================

    /// Connecte l'utilisateur si les deux champs sont renseignés
    ///
    /// Aucune vérification réelle : n'importe quel couple non vide passe.
    /// En cas de succès le solde est fixé à LOGIN_BALANCE et le formulaire
    /// de connexion est masqué. En cas d'échec rien ne change.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), SessionError> {
        if username.is_empty() || password.is_empty() {
            warn!("Login rejected: empty username or password");
            return Err(SessionError::InvalidCredentials);
        }

        self.user = Some(username.to_string());
        self.wallet_balance = LOGIN_BALANCE;
        self.login_form_visible = false;

        info!(user = %username, balance = self.wallet_balance, "User logged in");
        Ok(())
    }

    /// Déconnecte l'utilisateur
    ///
    /// Seul `user` est effacé : solde, panneau actif et formulaires restent
    /// tels quels.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user = %user, "User logged out");
        }
    }

    /// Simule une inscription et renvoie le message de confirmation
    ///
    /// Pas de compte créé, pas de contrôle d'unicité, pas de connexion.
    pub fn sign_up(&self, username: &str, password: &str) -> Result<String, SessionError> {
        if username.is_empty() || password.is_empty() {
            warn!("Sign-up rejected: empty username or password");
            return Err(SessionError::InvalidInput);
        }

        info!(user = %username, "User signed up");
        Ok(format!("User {} created successfully! Please log in.", username))
    }

    // ========================================================================
    // Portefeuille
    // ========================================================================

    /// Crédite le portefeuille
    ///
    /// CONCEPT RUST : comparaison sur f64
    /// - NaN > 0.0 est faux, donc un montant illisible est refusé
    /// - is_finite() écarte l'infini (une très longue suite de chiffres)
    /// - le nouveau solde doit lui aussi rester fini
    pub fn deposit(&mut self, amount: f64) -> Result<(), SessionError> {
        let new_balance = self.wallet_balance + amount;
        if amount.is_finite() && amount > 0.0 && new_balance.is_finite() {
            self.wallet_balance = new_balance;
            info!(amount, balance = self.wallet_balance, "Deposit accepted");
            Ok(())
        } else {
            warn!(amount, "Deposit rejected: invalid amount");
            Err(SessionError::InvalidAmount)
        }
    }

    /// Débite le portefeuille si le solde le permet
    pub fn withdraw(&mut self, amount: f64) -> Result<(), SessionError> {
        if amount.is_finite() && amount > 0.0 && amount <= self.wallet_balance {
            self.wallet_balance -= amount;
            info!(amount, balance = self.wallet_balance, "Withdrawal accepted");
            Ok(())
        } else {
            warn!(amount, balance = self.wallet_balance, "Withdrawal rejected");
            Err(SessionError::InsufficientFunds)
        }
    }

    // ========================================================================
    // Vue
    // ========================================================================

    pub fn select_feature(&mut self, feature: Feature) {
        debug!(feature = feature.title(), "Feature selected");
        self.active_feature = Some(feature);
    }

    /// Inverse la visibilité du formulaire de connexion et masque l'inscription
    pub fn toggle_login_form(&mut self) {
        self.login_form_visible = !self.login_form_visible;
        self.signup_form_visible = false;
        debug!(visible = self.login_form_visible, "Login form toggled");
    }

    /// Inverse la visibilité du formulaire d'inscription et masque la connexion
    pub fn toggle_signup_form(&mut self) {
        self.signup_form_visible = !self.signup_form_visible;
        self.login_form_visible = false;
        debug!(visible = self.signup_form_visible, "Sign-up form toggled");
    }

    // ========================================================================
    // Ordres (journalisés, sans effet sur le solde)
    // ========================================================================

    pub fn submit_buy_order(
        &self,
        amount: f64,
        crypto_type: &str,
        wallet_address: &str,
    ) -> OrderRequest {
        self.submit_order(OrderSide::Buy, amount, crypto_type, wallet_address)
    }

    pub fn submit_sell_order(
        &self,
        amount: f64,
        crypto_type: &str,
        wallet_address: &str,
    ) -> OrderRequest {
        self.submit_order(OrderSide::Sell, amount, crypto_type, wallet_address)
    }

    fn submit_order(
        &self,
        side: OrderSide,
        amount: f64,
        crypto_type: &str,
        wallet_address: &str,
    ) -> OrderRequest {
        let order = OrderRequest::new(
            side,
            amount,
            crypto_type.to_string(),
            wallet_address.to_string(),
        );

        info!(
            side = side.label(),
            amount,
            crypto = %crypto_type,
            address = %wallet_address,
            requested_at = %order.requested_at,
            "{}",
            order.summary()
        );

        order
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in(name: &str) -> Session {
        let mut session = Session::new();
        session.login(name, "pw").unwrap();
        session
    }

    #[test]
    fn test_initial_state() {
        let session = Session::new();
        assert_eq!(session.user(), None);
        assert_eq!(session.wallet_balance(), 0.0);
        assert_eq!(session.active_feature(), None);
        assert!(!session.is_login_form_visible());
        assert!(!session.is_signup_form_visible());
    }

    #[test]
    fn test_login_success() {
        let mut session = Session::new();
        session.toggle_login_form();
        assert!(session.is_login_form_visible());

        session.login("alice", "pw").unwrap();
        assert_eq!(session.user(), Some("alice"));
        assert_eq!(session.wallet_balance(), LOGIN_BALANCE);
        assert!(!session.is_login_form_visible());
    }

    #[test]
    fn test_login_resets_balance_to_constant() {
        let mut session = logged_in("alice");
        session.deposit(500.0).unwrap();
        session.login("bob", "secret").unwrap();
        assert_eq!(session.user(), Some("bob"));
        assert_eq!(session.wallet_balance(), 1000.0);
    }

    #[test]
    fn test_login_rejects_empty_fields() {
        for (user, pass) in [("", "pw"), ("alice", ""), ("", "")] {
            let mut session = Session::new();
            session.toggle_login_form();
            let before = session.clone();

            assert_eq!(session.login(user, pass), Err(SessionError::InvalidCredentials));
            assert_eq!(session, before);
        }
    }

    #[test]
    fn test_logout_keeps_balance_and_view() {
        let mut session = logged_in("alice");
        session.select_feature(Feature::Wallet);
        session.toggle_signup_form();

        session.logout();
        assert!(!session.is_logged_in());
        assert_eq!(session.wallet_balance(), 1000.0);
        assert_eq!(session.active_feature(), Some(Feature::Wallet));
        assert!(session.is_signup_form_visible());
    }

    #[test]
    fn test_sign_up() {
        let session = Session::new();
        let message = session.sign_up("carol", "pw").unwrap();
        assert_eq!(message, "User carol created successfully! Please log in.");
        assert!(!session.is_logged_in());

        assert_eq!(session.sign_up("", "pw"), Err(SessionError::InvalidInput));
        assert_eq!(session.sign_up("carol", ""), Err(SessionError::InvalidInput));
    }

    #[test]
    fn test_deposit() {
        let mut session = Session::new();
        session.deposit(25.5).unwrap();
        assert_eq!(session.wallet_balance(), 25.5);

        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(session.deposit(amount), Err(SessionError::InvalidAmount));
            assert_eq!(session.wallet_balance(), 25.5);
        }
    }

    #[test]
    fn test_deposit_overflowing_balance_is_rejected() {
        let mut session = Session::new();
        session.deposit(f64::MAX).unwrap();

        assert_eq!(session.deposit(f64::MAX), Err(SessionError::InvalidAmount));
        assert_eq!(session.wallet_balance(), f64::MAX);
    }

    #[test]
    fn test_withdraw() {
        let mut session = logged_in("alice");
        session.withdraw(400.0).unwrap();
        assert_eq!(session.wallet_balance(), 600.0);

        // Retrait exact du solde restant : autorisé
        session.withdraw(600.0).unwrap();
        assert_eq!(session.wallet_balance(), 0.0);

        for amount in [0.01, 0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert_eq!(session.withdraw(amount), Err(SessionError::InsufficientFunds));
            assert_eq!(session.wallet_balance(), 0.0);
        }
    }

    #[test]
    fn test_wallet_works_without_user() {
        let mut session = Session::new();
        session.deposit(10.0).unwrap();
        session.withdraw(4.0).unwrap();
        assert_eq!(session.wallet_balance(), 6.0);
    }

    #[test]
    fn test_toggles_are_mutually_exclusive() {
        let mut session = Session::new();

        session.toggle_login_form();
        assert!(session.is_login_form_visible() && !session.is_signup_form_visible());

        session.toggle_signup_form();
        assert!(!session.is_login_form_visible() && session.is_signup_form_visible());

        session.toggle_signup_form();
        assert!(!session.is_login_form_visible() && !session.is_signup_form_visible());

        for step in 0..10 {
            if step % 3 == 0 {
                session.toggle_login_form();
            } else {
                session.toggle_signup_form();
            }
            assert!(!(session.is_login_form_visible() && session.is_signup_form_visible()));
        }
    }

    #[test]
    fn test_select_feature_leaves_wallet_alone() {
        let mut session = logged_in("alice");
        session.select_feature(Feature::BecomeVendor);
        assert_eq!(session.active_feature(), Some(Feature::BecomeVendor));
        assert_eq!(session.user(), Some("alice"));
        assert_eq!(session.wallet_balance(), 1000.0);
    }

    #[test]
    fn test_orders_do_not_touch_state() {
        let session = logged_in("alice");
        let before = session.clone();

        let buy = session.submit_buy_order(3.0, "BTC", "addr");
        let sell = session.submit_sell_order(-1.0, "", "");

        assert_eq!(buy.side, OrderSide::Buy);
        assert_eq!(sell.side, OrderSide::Sell);
        assert_eq!(session, before);
    }
}
