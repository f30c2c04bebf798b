// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Composition : App possède la Session (cœur métier) et ajoute par-dessus
//    l'état purement visuel (buffers de saisie, focus, notifications)
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Les erreurs de la Session deviennent des notifications, jamais des panics
// ============================================================================

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{
    Feature, Notification, NotificationLevel, Offer, OfferBook, OfferPayload, OrderSide, Session,
};

// ============================================================================
// Formulaires
// ============================================================================

/// Formulaires de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    SignUp,
    Offer,
    Wallet,
    Buy,
    Sell,
}

impl FormKind {
    /// Ordre de parcours avec Tab
    pub const ALL: [FormKind; 6] = [
        FormKind::Login,
        FormKind::SignUp,
        FormKind::Offer,
        FormKind::Wallet,
        FormKind::Buy,
        FormKind::Sell,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            FormKind::Login => "Login",
            FormKind::SignUp => "Sign Up",
            FormKind::Offer => "New Offer",
            FormKind::Wallet => "Amount",
            FormKind::Buy => "Buy",
            FormKind::Sell => "Sell",
        }
    }
}

/// Type de champ : détermine les caractères acceptés et l'affichage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Affiché masqué (mot de passe)
    Secret,
    /// Nombre décimal, signe accepté
    Amount,
    /// Entier positif
    Integer,
}

impl FieldKind {
    pub fn accepts(&self, c: char) -> bool {
        match self {
            FieldKind::Text | FieldKind::Secret => !c.is_control(),
            FieldKind::Amount => c.is_ascii_digit() || c == '.' || c == '-',
            FieldKind::Integer => c.is_ascii_digit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl FormField {
    fn new(label: &'static str, kind: FieldKind) -> Self {
        Self {
            label,
            kind,
            value: String::new(),
        }
    }

    /// Valeur telle qu'affichée à l'écran
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Secret => "*".repeat(self.value.chars().count()),
            _ => self.value.clone(),
        }
    }
}

/// Buffer de saisie d'un formulaire
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focused_field: usize,
}

impl Form {
    pub fn new(kind: FormKind) -> Self {
        let fields = match kind {
            FormKind::Login | FormKind::SignUp => vec![
                FormField::new("Username", FieldKind::Text),
                FormField::new("Password", FieldKind::Secret),
            ],
            FormKind::Offer => vec![
                FormField::new("Title", FieldKind::Text),
                FormField::new("Description", FieldKind::Text),
                FormField::new("Asset URL", FieldKind::Text),
                FormField::new("Price", FieldKind::Integer),
            ],
            FormKind::Wallet => vec![FormField::new("Amount", FieldKind::Amount)],
            FormKind::Buy | FormKind::Sell => vec![
                FormField::new("Amount", FieldKind::Amount),
                FormField::new("Crypto Type", FieldKind::Text),
                FormField::new("Wallet Address", FieldKind::Text),
            ],
        };

        Self {
            kind,
            fields,
            focused_field: 0,
        }
    }

    /// Valeur brute du champ `index` ("" si l'index n'existe pas)
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = (self.focused_field + 1) % self.fields.len();
    }

    pub fn previous_field(&mut self) {
        let len = self.fields.len();
        self.focused_field = (self.focused_field + len - 1) % len;
    }

    /// Ajoute un caractère au champ courant s'il est accepté
    pub fn push_char(&mut self, c: char) -> bool {
        match self.fields.get_mut(self.focused_field) {
            Some(field) if field.kind.accepts(c) => {
                field.value.push(c);
                true
            }
            _ => false,
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused_field) {
            field.value.pop();
        }
    }

    /// Vide tous les champs et revient au premier
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focused_field = 0;
    }
}

/// Interprète la saisie d'un champ montant
fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

// ============================================================================
// Structure : App
// ============================================================================

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Cœur métier : utilisateur, solde, panneau actif, formulaires d'auth
    pub session: Session,

    /// Offres créées depuis le panneau "Create Offer"
    pub offers: OfferBook,

    /// Index de l'offre sélectionnée dans la liste
    pub selected_offer: usize,

    /// Offre en cours de modification (None : le formulaire crée une offre)
    pub editing_offer: Option<u64>,

    pub login_form: Form,
    pub signup_form: Form,
    pub offer_form: Form,
    pub wallet_form: Form,
    pub buy_form: Form,
    pub sell_form: Form,

    /// Formulaire qui reçoit les touches (None : mode navigation)
    pub focus: Option<FormKind>,

    /// Visibilité des formulaires du panneau Buy/Sell (indépendantes)
    pub buy_form_visible: bool,
    pub sell_form_visible: bool,

    /// Messages affichés au-dessus du footer, du plus ancien au plus récent
    pub notifications: VecDeque<Notification>,

    /// Two-step quit : première pression de 'q' arme, deuxième quitte
    pub confirm_quit: bool,

    /// Two-step delete sur la liste des offres
    pub confirm_delete: bool,

    max_notifications: usize,
    notification_ttl: Duration,
}

impl App {
    /// Crée l'application avec une session vierge
    pub fn new(config: &Config) -> Self {
        Self {
            running: true,
            session: Session::new(),
            offers: OfferBook::new(),
            selected_offer: 0,
            editing_offer: None,
            login_form: Form::new(FormKind::Login),
            signup_form: Form::new(FormKind::SignUp),
            offer_form: Form::new(FormKind::Offer),
            wallet_form: Form::new(FormKind::Wallet),
            buy_form: Form::new(FormKind::Buy),
            sell_form: Form::new(FormKind::Sell),
            focus: None,
            buy_form_visible: false,
            sell_form_visible: false,
            notifications: VecDeque::new(),
            confirm_quit: false,
            confirm_delete: false,
            max_notifications: config.max_notifications.max(1),
            notification_ttl: config.notification_ttl(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick : appelé à chaque itération de la boucle
    ///
    /// Retire les notifications expirées.
    pub fn tick(&mut self) {
        self.expire_notifications(Utc::now());
    }

    // ========================================================================
    // Confirmations two-step
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn request_delete(&mut self) {
        self.confirm_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    pub fn is_awaiting_delete_confirmation(&self) -> bool {
        self.confirm_delete
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Ajoute une notification, en retirant les plus anciennes si besoin
    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification::new(level, message);
        debug!(?level, message = %notification.message, "Notification posted");

        self.notifications.push_back(notification);
        while self.notifications.len() > self.max_notifications {
            self.notifications.pop_front();
        }
    }

    pub fn expire_notifications(&mut self, now: DateTime<Utc>) {
        let ttl = self.notification_ttl;
        self.notifications.retain(|n| !n.is_expired(now, ttl));
    }

    // ========================================================================
    // Navigation (header)
    // ========================================================================

    pub fn select_feature(&mut self, feature: Feature) {
        self.session.select_feature(feature);
        self.cancel_delete();
        self.refresh_focus();
    }

    pub fn is_feature_active(&self, feature: Feature) -> bool {
        self.session.active_feature() == Some(feature)
    }

    /// Affiche/masque le formulaire de connexion et lui donne le focus
    pub fn toggle_login_form(&mut self) {
        self.session.toggle_login_form();
        if self.session.is_login_form_visible() {
            self.focus = Some(FormKind::Login);
        }
        self.refresh_focus();
    }

    pub fn toggle_signup_form(&mut self) {
        self.session.toggle_signup_form();
        if self.session.is_signup_form_visible() {
            self.focus = Some(FormKind::SignUp);
        }
        self.refresh_focus();
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.notify(NotificationLevel::Info, "Logged out");
    }

    pub fn toggle_buy_form(&mut self) {
        self.buy_form_visible = !self.buy_form_visible;
        self.refresh_focus();
    }

    pub fn toggle_sell_form(&mut self) {
        self.sell_form_visible = !self.sell_form_visible;
        self.refresh_focus();
    }

    // ========================================================================
    // Focus des formulaires
    // ========================================================================

    pub fn is_form_visible(&self, kind: FormKind) -> bool {
        match kind {
            FormKind::Login => self.session.is_login_form_visible(),
            FormKind::SignUp => self.session.is_signup_form_visible(),
            FormKind::Offer => self.is_feature_active(Feature::CreateOffer),
            FormKind::Wallet => self.is_feature_active(Feature::Wallet),
            FormKind::Buy => self.buy_form_visible,
            FormKind::Sell => self.sell_form_visible,
        }
    }

    pub fn visible_forms(&self) -> Vec<FormKind> {
        FormKind::ALL
            .into_iter()
            .filter(|kind| self.is_form_visible(*kind))
            .collect()
    }

    /// Donne le focus au formulaire visible suivant (Tab)
    pub fn focus_next_form(&mut self) {
        let forms = self.visible_forms();
        if forms.is_empty() {
            self.focus = None;
            return;
        }

        let next = match self.focus.and_then(|f| forms.iter().position(|k| *k == f)) {
            Some(index) => forms[(index + 1) % forms.len()],
            None => forms[0],
        };
        debug!(form = next.title(), "Form focused");
        self.focus = Some(next);
    }

    /// Quitte le formulaire courant (ESC)
    ///
    /// Quitter le formulaire d'offre abandonne une modification en cours.
    pub fn unfocus(&mut self) {
        if self.focus == Some(FormKind::Offer) && self.editing_offer.take().is_some() {
            self.offer_form.clear();
        }
        self.focus = None;
    }

    pub fn is_editing(&self) -> bool {
        self.focus.is_some()
    }

    /// Perd le focus si le formulaire courant n'est plus affiché
    fn refresh_focus(&mut self) {
        if let Some(kind) = self.focus {
            if !self.is_form_visible(kind) {
                self.focus = None;
            }
        }
    }

    pub fn form(&self, kind: FormKind) -> &Form {
        match kind {
            FormKind::Login => &self.login_form,
            FormKind::SignUp => &self.signup_form,
            FormKind::Offer => &self.offer_form,
            FormKind::Wallet => &self.wallet_form,
            FormKind::Buy => &self.buy_form,
            FormKind::Sell => &self.sell_form,
        }
    }

    fn form_mut(&mut self, kind: FormKind) -> &mut Form {
        match kind {
            FormKind::Login => &mut self.login_form,
            FormKind::SignUp => &mut self.signup_form,
            FormKind::Offer => &mut self.offer_form,
            FormKind::Wallet => &mut self.wallet_form,
            FormKind::Buy => &mut self.buy_form,
            FormKind::Sell => &mut self.sell_form,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(kind) = self.focus {
            self.form_mut(kind).push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(kind) = self.focus {
            self.form_mut(kind).backspace();
        }
    }

    pub fn next_field(&mut self) {
        if let Some(kind) = self.focus {
            self.form_mut(kind).next_field();
        }
    }

    pub fn previous_field(&mut self) {
        if let Some(kind) = self.focus {
            self.form_mut(kind).previous_field();
        }
    }

    // ========================================================================
    // Soumission
    // ========================================================================

    /// Valide le formulaire qui a le focus (Enter)
    ///
    /// Dans le formulaire Wallet, Enter fait un dépôt.
    pub fn submit_focused(&mut self) {
        match self.focus {
            Some(FormKind::Login) => self.submit_login(),
            Some(FormKind::SignUp) => self.submit_signup(),
            Some(FormKind::Offer) => self.submit_offer(),
            Some(FormKind::Wallet) => self.deposit(),
            Some(FormKind::Buy) => self.submit_order(OrderSide::Buy),
            Some(FormKind::Sell) => self.submit_order(OrderSide::Sell),
            None => {}
        }
    }

    /// Les champs sont vidés quel que soit le résultat
    fn submit_login(&mut self) {
        let username = self.login_form.value(0).to_string();
        let password = self.login_form.value(1).to_string();
        self.login_form.clear();

        match self.session.login(&username, &password) {
            Ok(()) => {
                self.notify(NotificationLevel::Success, format!("Welcome, {}!", username));
                self.refresh_focus();
            }
            Err(e) => self.notify(NotificationLevel::Error, e.to_string()),
        }
    }

    fn submit_signup(&mut self) {
        let username = self.signup_form.value(0).to_string();
        let password = self.signup_form.value(1).to_string();
        self.signup_form.clear();

        match self.session.sign_up(&username, &password) {
            Ok(message) => self.notify(NotificationLevel::Success, message),
            Err(e) => self.notify(NotificationLevel::Error, e.to_string()),
        }
    }

    /// Dépose le montant saisi ; le champ n'est vidé qu'en cas de succès
    pub fn deposit(&mut self) {
        let amount = parse_amount(self.wallet_form.value(0)).unwrap_or(f64::NAN);

        match self.session.deposit(amount) {
            Ok(()) => {
                self.wallet_form.clear();
                self.notify(NotificationLevel::Success, format!("Deposited ${}", amount));
            }
            Err(e) => self.notify(NotificationLevel::Error, e.to_string()),
        }
    }

    /// Retire le montant saisi ; le champ n'est vidé qu'en cas de succès
    pub fn withdraw(&mut self) {
        let amount = parse_amount(self.wallet_form.value(0)).unwrap_or(f64::NAN);

        match self.session.withdraw(amount) {
            Ok(()) => {
                self.wallet_form.clear();
                self.notify(NotificationLevel::Success, format!("Withdrew ${}", amount));
            }
            Err(e) => self.notify(NotificationLevel::Error, e.to_string()),
        }
    }

    /// Transmet la demande à la session ; les champs restent remplis
    fn submit_order(&mut self, side: OrderSide) {
        let form = match side {
            OrderSide::Buy => &self.buy_form,
            OrderSide::Sell => &self.sell_form,
        };
        let amount = parse_amount(form.value(0)).unwrap_or(0.0);
        let crypto_type = form.value(1).to_string();
        let wallet_address = form.value(2).to_string();

        let order = match side {
            OrderSide::Buy => self.session.submit_buy_order(amount, &crypto_type, &wallet_address),
            OrderSide::Sell => {
                self.session.submit_sell_order(amount, &crypto_type, &wallet_address)
            }
        };

        self.notify(NotificationLevel::Info, order.receipt());
    }

    /// Crée une offre, ou met à jour celle en cours de modification
    fn submit_offer(&mut self) {
        let payload = OfferPayload::parse(
            self.offer_form.value(0),
            self.offer_form.value(1),
            self.offer_form.value(2),
            self.offer_form.value(3),
        );

        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                self.notify(NotificationLevel::Error, e.to_string());
                return;
            }
        };

        match self.editing_offer.take() {
            Some(id) => match self.offers.update(id, payload) {
                Ok(offer) => {
                    self.notify(NotificationLevel::Success, format!("Offer #{} updated", offer.id))
                }
                Err(e) => self.notify(NotificationLevel::Error, e.to_string()),
            },
            None => {
                let creator = self.session.user().unwrap_or("Guest").to_string();
                let offer = self.offers.add(payload, &creator);
                self.selected_offer = self.offers.len() - 1;
                self.notify(
                    NotificationLevel::Success,
                    format!("Offer #{} \"{}\" published", offer.id, offer.title),
                );
            }
        }

        self.offer_form.clear();
    }

    // ========================================================================
    // Liste des offres
    // ========================================================================

    pub fn navigate_up(&mut self) {
        self.selected_offer = self.selected_offer.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.offers.len().saturating_sub(1);
        self.selected_offer = (self.selected_offer + 1).min(max_index);
    }

    pub fn selected_offer(&self) -> Option<&Offer> {
        self.offers.nth(self.selected_offer)
    }

    /// Charge l'offre sélectionnée dans le formulaire pour modification
    pub fn edit_selected_offer(&mut self) {
        let Some(offer) = self.selected_offer().cloned() else {
            return;
        };

        info!(id = offer.id, "Editing offer");
        self.editing_offer = Some(offer.id);
        self.offer_form.clear();
        self.offer_form.set_value(0, offer.title);
        self.offer_form.set_value(1, offer.description);
        self.offer_form.set_value(2, offer.asset_url);
        self.offer_form.set_value(3, offer.price.to_string());
        self.focus = Some(FormKind::Offer);
    }

    /// Supprime l'offre sélectionnée et réajuste la sélection
    pub fn delete_selected_offer(&mut self) {
        if let Some(id) = self.selected_offer().map(|o| o.id) {
            match self.offers.remove(id) {
                Ok(offer) => {
                    if self.editing_offer == Some(id) {
                        self.editing_offer = None;
                        self.offer_form.clear();
                    }
                    self.notify(NotificationLevel::Info, format!("Offer #{} removed", offer.id));
                }
                Err(e) => self.notify(NotificationLevel::Error, e.to_string()),
            }

            // Ajuste l'index si on a supprimé le dernier élément
            if self.selected_offer >= self.offers.len() && self.selected_offer > 0 {
                self.selected_offer -= 1;
            }
        }

        self.confirm_delete = false;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(app: &mut App, text: &str) {
        for c in text.chars() {
            app.input_char(c);
        }
    }

    fn login(app: &mut App, user: &str) {
        app.toggle_login_form();
        type_into(app, user);
        app.next_field();
        type_into(app, "pw");
        app.submit_focused();
    }

    fn last_message(app: &App) -> &str {
        app.notifications.back().map(|n| n.message.as_str()).unwrap_or("")
    }

    #[test]
    fn test_app_creation() {
        let app = App::default();
        assert!(app.is_running());
        assert!(!app.session.is_logged_in());
        assert!(app.focus.is_none());
        assert!(app.visible_forms().is_empty());
    }

    #[test]
    fn test_app_quit() {
        let mut app = App::default();
        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_field_kinds_filter_input() {
        let mut form = Form::new(FormKind::Wallet);
        for c in "12a.5x".chars() {
            form.push_char(c);
        }
        assert_eq!(form.value(0), "12.5");

        let mut offer = Form::new(FormKind::Offer);
        offer.focused_field = 3;
        for c in "-42".chars() {
            offer.push_char(c);
        }
        assert_eq!(offer.value(3), "42");
    }

    #[test]
    fn test_password_is_masked() {
        let mut form = Form::new(FormKind::Login);
        form.next_field();
        form.push_char('a');
        form.push_char('b');
        assert_eq!(form.fields[1].display_value(), "**");
        assert_eq!(form.value(1), "ab");
    }

    #[test]
    fn test_field_cycle_wraps() {
        let mut form = Form::new(FormKind::Buy);
        form.previous_field();
        assert_eq!(form.focused_field, 2);
        form.next_field();
        assert_eq!(form.focused_field, 0);
    }

    #[test]
    fn test_login_through_form() {
        let mut app = App::default();
        login(&mut app, "alice");

        assert_eq!(app.session.user(), Some("alice"));
        assert_eq!(app.session.wallet_balance(), 1000.0);
        assert!(!app.session.is_login_form_visible());
        assert!(app.focus.is_none());
        assert_eq!(app.login_form.value(0), "");
        assert_eq!(last_message(&app), "Welcome, alice!");
    }

    #[test]
    fn test_failed_login_clears_fields_and_notifies() {
        let mut app = App::default();
        app.toggle_login_form();
        type_into(&mut app, "alice");
        app.submit_focused();

        assert!(!app.session.is_logged_in());
        assert!(app.session.is_login_form_visible());
        assert_eq!(app.login_form.value(0), "");
        assert_eq!(last_message(&app), "Invalid username or password");
        assert_eq!(
            app.notifications.back().map(|n| n.level),
            Some(NotificationLevel::Error)
        );
    }

    #[test]
    fn test_signup_does_not_log_in() {
        let mut app = App::default();
        app.toggle_signup_form();
        assert_eq!(app.focus, Some(FormKind::SignUp));
        type_into(&mut app, "bob");
        app.next_field();
        type_into(&mut app, "pw");
        app.submit_focused();

        assert!(!app.session.is_logged_in());
        assert_eq!(last_message(&app), "User bob created successfully! Please log in.");
    }

    #[test]
    fn test_toggle_login_hides_signup_and_moves_focus() {
        let mut app = App::default();
        app.toggle_signup_form();
        app.toggle_login_form();
        assert!(app.session.is_login_form_visible());
        assert!(!app.session.is_signup_form_visible());
        assert_eq!(app.focus, Some(FormKind::Login));

        app.toggle_login_form();
        assert!(app.focus.is_none());
    }

    #[test]
    fn test_wallet_deposit_and_withdraw() {
        let mut app = App::default();
        login(&mut app, "alice");
        app.select_feature(Feature::Wallet);
        app.focus_next_form();
        assert_eq!(app.focus, Some(FormKind::Wallet));

        type_into(&mut app, "50");
        app.submit_focused();
        assert_eq!(app.session.wallet_balance(), 1050.0);
        assert_eq!(app.wallet_form.value(0), "");

        type_into(&mut app, "2000");
        app.withdraw();
        assert_eq!(app.session.wallet_balance(), 1050.0);
        assert_eq!(app.wallet_form.value(0), "2000");
        assert_eq!(last_message(&app), "Insufficient balance or invalid amount");
    }

    #[test]
    fn test_huge_typed_amount_keeps_balance_finite() {
        let mut app = App::default();
        login(&mut app, "alice");
        app.select_feature(Feature::Wallet);
        app.focus_next_form();

        // 400 chiffres : f64 donne l'infini
        type_into(&mut app, &"9".repeat(400));
        app.submit_focused();
        assert_eq!(app.session.wallet_balance(), 1000.0);
        assert_eq!(last_message(&app), "Please enter a valid amount");

        app.withdraw();
        assert_eq!(app.session.wallet_balance(), 1000.0);
        assert!(app.session.wallet_balance().is_finite());
    }

    #[test]
    fn test_empty_amount_is_invalid() {
        let mut app = App::default();
        app.deposit();
        assert_eq!(app.session.wallet_balance(), 0.0);
        assert_eq!(last_message(&app), "Please enter a valid amount");
    }

    #[test]
    fn test_changing_feature_drops_hidden_focus() {
        let mut app = App::default();
        app.select_feature(Feature::Wallet);
        app.focus_next_form();
        assert_eq!(app.focus, Some(FormKind::Wallet));

        app.select_feature(Feature::BecomeVendor);
        assert!(app.focus.is_none());
    }

    #[test]
    fn test_focus_cycles_visible_forms() {
        let mut app = App::default();
        app.select_feature(Feature::CreateOffer);
        app.toggle_buy_form();
        app.toggle_sell_form();

        app.focus_next_form();
        assert_eq!(app.focus, Some(FormKind::Offer));
        app.focus_next_form();
        assert_eq!(app.focus, Some(FormKind::Buy));
        app.focus_next_form();
        assert_eq!(app.focus, Some(FormKind::Sell));
        app.focus_next_form();
        assert_eq!(app.focus, Some(FormKind::Offer));

        app.toggle_sell_form();
        app.toggle_buy_form();
        app.unfocus();
        assert_eq!(app.visible_forms(), vec![FormKind::Offer]);
    }

    #[test]
    fn test_order_is_notified_and_fields_kept() {
        let mut app = App::default();
        app.toggle_buy_form();
        app.focus_next_form();
        type_into(&mut app, "2");
        app.next_field();
        type_into(&mut app, "BTC");
        app.next_field();
        type_into(&mut app, "addr");
        app.submit_focused();

        let message = last_message(&app);
        assert!(message.starts_with("Buy 2 BTC to addr ("), "{}", message);
        assert!(message.ends_with(" UTC)"), "{}", message);
        assert_eq!(app.buy_form.value(1), "BTC");
        assert_eq!(app.session.wallet_balance(), 0.0);
    }

    #[test]
    fn test_offer_lifecycle() {
        let mut app = App::default();
        login(&mut app, "alice");
        app.select_feature(Feature::CreateOffer);
        app.focus_next_form();
        assert_eq!(app.focus, Some(FormKind::Offer));

        type_into(&mut app, "Gold");
        app.next_field();
        app.next_field();
        app.next_field();
        type_into(&mut app, "10");
        app.submit_focused();

        let offer = app.selected_offer().cloned().unwrap();
        assert_eq!(offer.title, "Gold");
        assert_eq!(offer.creator, "alice");
        assert_eq!(app.offer_form.value(0), "");

        // Modification
        app.unfocus();
        app.edit_selected_offer();
        assert_eq!(app.editing_offer, Some(offer.id));
        assert_eq!(app.offer_form.value(3), "10");
        app.offer_form.focused_field = 3;
        app.backspace();
        app.backspace();
        type_into(&mut app, "25");
        app.submit_focused();
        assert_eq!(app.offers.get(offer.id).unwrap().price, 25);
        assert!(app.editing_offer.is_none());
        assert_eq!(app.offers.len(), 1);

        // Suppression
        app.request_delete();
        app.delete_selected_offer();
        assert!(app.offers.is_empty());
        assert!(!app.is_awaiting_delete_confirmation());
    }

    #[test]
    fn test_offer_by_guest_and_invalid_price() {
        let mut app = App::default();
        app.select_feature(Feature::CreateOffer);
        app.focus_next_form();
        type_into(&mut app, "Coin");
        app.submit_focused();
        assert!(app.offers.is_empty());
        assert_eq!(last_message(&app), "invalid offer: '' is not a valid price");
        assert_eq!(app.offer_form.value(0), "Coin");

        app.offer_form.set_value(3, "5");
        app.submit_focused();
        assert_eq!(app.selected_offer().map(|o| o.creator.as_str()), Some("Guest"));
    }

    #[test]
    fn test_offer_navigation() {
        let mut app = App::default();
        for title in ["A", "B", "C"] {
            app.offers.add(
                OfferPayload::parse(title, "", "", "1").unwrap(),
                "Guest",
            );
        }

        app.navigate_down();
        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_offer, 2);

        app.delete_selected_offer();
        assert_eq!(app.selected_offer, 1);

        app.navigate_up();
        app.navigate_up();
        assert_eq!(app.selected_offer, 0);
    }

    #[test]
    fn test_notifications_are_bounded_and_expire() {
        let config = Config {
            max_notifications: 2,
            notification_ttl_secs: 5,
            ..Config::default()
        };
        let mut app = App::new(&config);

        app.notify(NotificationLevel::Info, "one");
        app.notify(NotificationLevel::Info, "two");
        app.notify(NotificationLevel::Info, "three");
        let messages: Vec<&str> = app.notifications.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);

        let later = Utc::now() + Duration::seconds(6);
        app.expire_notifications(later);
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_logout_keeps_view_state() {
        let mut app = App::default();
        login(&mut app, "alice");
        app.select_feature(Feature::Dashboard);
        app.logout();

        assert!(!app.session.is_logged_in());
        assert_eq!(app.session.wallet_balance(), 1000.0);
        assert!(app.is_feature_active(Feature::Dashboard));
    }
}
