// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'écran unique de l'application :
//
//   ┌ header : logo, features, connexion ───────────────┐
//   │ formulaire de connexion / inscription (optionnel)  │
//   ├ contenu ──────────────────────────┬ côté ─────────┤
//   │ bienvenue + solde                 │ About          │
//   │ panneau de la feature active      │                │
//   │ Buy/Sell                          │ News           │
//   ├───────────────────────────────────┴───────────────┤
//   │ notifications (optionnel)                          │
//   └ footer : raccourcis / confirmations ──────────────┘
//
// CONCEPTS RATATUI :
// 1. Layout : découpage de l'espace en zones
// 2. Longueur 0 : une zone vide pour les blocs masqués
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::{Feature, NotificationLevel};
use crate::ui::forms::form_height;
use crate::ui::panels::{
    buy_sell_height, render_auth_form, render_buy_sell, render_feature_panel, render_side,
};

/// Dessine l'interface complète
///
/// # Arguments
/// * `frame` - Surface de dessin ratatui
/// * `app` - État de l'application (lecture seule)
pub fn render(frame: &mut Frame, app: &App) {
    let auth_visible =
        app.session.is_login_form_visible() || app.session.is_signup_form_visible();
    let auth_height = if auth_visible {
        form_height(&app.login_form)
    } else {
        0
    };

    let notifications_height = if app.notifications.is_empty() {
        0
    } else {
        app.notifications.len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                    // Header
            Constraint::Length(auth_height),          // Connexion / inscription
            Constraint::Min(0),                       // Contenu
            Constraint::Length(notifications_height), // Notifications
            Constraint::Length(3),                    // Footer
        ])
        .split(frame.size());

    render_header(frame, app, chunks[0]);

    if auth_height > 0 {
        render_auth_form(frame, app, chunks[1]);
    }

    render_body(frame, app, chunks[2]);

    if notifications_height > 0 {
        render_notifications(frame, app, chunks[3]);
    }

    render_footer(frame, app, chunks[4]);
}

// ============================================================================
// Header
// ============================================================================

/// Dessine le header : logo et features à gauche, compte à droite
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner);

    let mut left = vec![
        Span::styled(
            "Wazito Coin",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];
    for (index, feature) in Feature::PUBLIC.iter().enumerate() {
        left.extend(feature_spans(app, *feature, index + 1));
    }

    let right = if app.session.is_logged_in() {
        let mut spans = feature_spans(app, Feature::Dashboard, 4);
        spans.push(key_span("[o]"));
        spans.push(Span::raw(" Logout"));
        spans
    } else {
        vec![
            key_span("[l]"),
            Span::raw(" Login  "),
            key_span("[s]"),
            Span::raw(" Sign Up"),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(left)), halves[0]);
    frame.render_widget(
        Paragraph::new(Line::from(right)).alignment(Alignment::Right),
        halves[1],
    );
}

/// "[n] Titre" avec le titre en vidéo inverse si la feature est active
fn feature_spans(app: &App, feature: Feature, number: usize) -> Vec<Span<'static>> {
    let title_style = if app.is_feature_active(feature) {
        Style::default().add_modifier(Modifier::BOLD).add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };

    vec![
        key_span(format!("[{}]", number)),
        Span::styled(format!(" {}", feature.title()), title_style),
        Span::raw("  "),
    ]
}

fn key_span(key: impl Into<String>) -> Span<'static> {
    Span::styled(
        key.into(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )
}

// ============================================================================
// Contenu
// ============================================================================

fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(area);

    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),                   // Bienvenue
            Constraint::Min(0),                      // Feature active
            Constraint::Length(buy_sell_height(app)), // Buy/Sell
        ])
        .split(columns[0]);

    render_welcome(frame, app, content[0]);
    render_feature_panel(frame, app, content[1]);
    render_buy_sell(frame, app, content[2]);

    render_side(frame, columns[1]);
}

/// Bloc de bienvenue : le solde n'apparaît qu'une fois connecté
fn render_welcome(frame: &mut Frame, app: &App, area: Rect) {
    let name = app.session.user().unwrap_or("Guest");

    let mut lines = vec![Line::from(Span::styled(
        format!("Welcome, {}!", name),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    if app.session.is_logged_in() {
        lines.push(Line::from(vec![
            Span::raw("Wallet Balance: "),
            Span::styled(
                format!("${}", app.session.wallet_balance()),
                Style::default().fg(Color::Green),
            ),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Dashboard ");

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// Notifications
// ============================================================================

fn render_notifications(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .notifications
        .iter()
        .map(|notification| {
            let (prefix, color) = match notification.level {
                NotificationLevel::Info => ("•", Color::Cyan),
                NotificationLevel::Success => ("✓", Color::Green),
                NotificationLevel::Error => ("✗", Color::Red),
            };

            ListItem::new(format!(
                "{} {}  {}",
                notification.created_at.format("%H:%M:%S"),
                prefix,
                notification.message
            ))
            .style(Style::default().fg(color))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Notifications ");

    frame.render_widget(List::new(items).block(block), area);
}

// ============================================================================
// Footer : Instructions
// ============================================================================

/// Dessine le footer avec les raccourcis clavier
///
/// Priorité : confirmation de suppression, confirmation de quit,
/// aide du formulaire actif, raccourcis normaux.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let warning = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let blinking = Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::SLOW_BLINK);

    let shortcuts = if app.is_awaiting_delete_confirmation() {
        let title = app
            .selected_offer()
            .map(|offer| offer.title.clone())
            .unwrap_or_else(|| "?".to_string());

        Line::from(vec![
            Span::styled("⚠  Press ", warning),
            Span::styled("[x]", blinking),
            Span::styled(
                format!(" again to delete \"{}\", any other key to cancel ⚠", title),
                warning,
            ),
        ])
    } else if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Press ", warning),
            Span::styled("[q]", blinking),
            Span::styled(" again to quit, any other key to cancel ⚠", warning),
        ])
    } else if app.is_editing() {
        Line::from(vec![
            key_span("[Enter]"),
            Span::raw(" Submit  "),
            key_span("[Tab/↓]"),
            Span::raw(" Next field  "),
            key_span("[↑]"),
            Span::raw(" Previous field  "),
            key_span("[Esc]"),
            Span::raw(" Leave form"),
        ])
    } else {
        let mut spans = vec![
            key_span("[q]"),
            Span::raw(" Quit  "),
            key_span("[Tab]"),
            Span::raw(" Focus form  "),
            key_span("[b/v]"),
            Span::raw(" Buy/Sell forms"),
        ];

        if app.is_feature_active(Feature::CreateOffer) && !app.offers.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(key_span("[↑↓ / j k]"));
            spans.push(Span::raw(" Select  "));
            spans.push(key_span("[e]"));
            spans.push(Span::raw(" Edit  "));
            spans.push(Span::styled(
                "[x]",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" Delete"));
        }

        Line::from(spans)
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================
