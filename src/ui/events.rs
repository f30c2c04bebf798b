// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Polling avec timeout : la boucle tourne même sans frappe clavier
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};

use crate::models::Feature;

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (expiration des notifications)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    /// Durée maximale d'attente d'une touche avant d'émettre un Tick
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au maximum tick_rate
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release :
                // on ne garde que Press pour éviter les doublons
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),

                // Resize, souris, release... : simple tick (le rendu suit)
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

// ============================================================================
// Helpers : Convertir KeyEvent en action
// ============================================================================
// CONCEPT RUST : Pattern matching avec if let
// - Destructure Event::Key et vérifie le KeyCode en une ligne
// - Les raccourcis à une lettre ne valent qu'en mode navigation :
//   en mode saisie, main.rs traite d'abord les touches du formulaire
// ============================================================================

fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        Event::Tick => None,
    }
}

/// Touche 'q' (quitter, two-step)
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q') | KeyCode::Char('Q')))
}

pub fn is_escape_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Esc))
}

pub fn is_enter_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Enter))
}

pub fn is_tab_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Tab))
}

pub fn is_backspace_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Backspace))
}

/// Flèche vers le haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K')))
}

/// Flèche vers le bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J')))
}

/// Champ suivant dans un formulaire : Tab ou flèche bas
///
/// Pas de 'j' ici : la lettre doit pouvoir être saisie.
pub fn is_next_field_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Tab | KeyCode::Down))
}

/// Champ précédent : Shift+Tab ou flèche haut
pub fn is_previous_field_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::BackTab | KeyCode::Up))
}

/// Panneau demandé par les touches 1 à 4
pub fn feature_from_event(event: &Event) -> Option<Feature> {
    match key_code(event)? {
        KeyCode::Char('1') => Some(Feature::CreateOffer),
        KeyCode::Char('2') => Some(Feature::Wallet),
        KeyCode::Char('3') => Some(Feature::BecomeVendor),
        KeyCode::Char('4') => Some(Feature::Dashboard),
        _ => None,
    }
}

/// 'l' : afficher/masquer le formulaire de connexion
pub fn is_login_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('l') | KeyCode::Char('L')))
}

/// 's' : afficher/masquer le formulaire d'inscription
pub fn is_signup_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('s') | KeyCode::Char('S')))
}

/// 'o' : déconnexion
pub fn is_logout_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('o') | KeyCode::Char('O')))
}

/// 'b' : afficher/masquer le formulaire d'achat
pub fn is_buy_toggle_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('b') | KeyCode::Char('B')))
}

/// 'v' : afficher/masquer le formulaire de vente
pub fn is_sell_toggle_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('v') | KeyCode::Char('V')))
}

/// 'e' : modifier l'offre sélectionnée
pub fn is_edit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('e') | KeyCode::Char('E')))
}

/// 'x' : supprimer l'offre sélectionnée (two-step)
pub fn is_delete_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('x') | KeyCode::Char('X')))
}

/// Ctrl+W : retrait depuis le formulaire Wallet
pub fn is_withdraw_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('w') | KeyCode::Char('W'))
    } else {
        false
    }
}

/// Extrait le caractère saisi (les combinaisons avec Ctrl/Alt sont ignorées)
pub fn get_char_from_event(event: &Event) -> Option<char> {
    if let Event::Key(key) = event {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        if let KeyCode::Char(c) = key.code {
            return Some(c);
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================
