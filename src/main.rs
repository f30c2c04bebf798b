// ============================================================================
// Wazito Coin - Terminal
// ============================================================================
// Démo d'une plateforme d'échange de crypto-monnaies, sans backend :
// connexion simulée, portefeuille en mémoire, offres et ordres journalisés.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Un seul propriétaire de l'état : App est passée par &mut, sans Mutex
// ============================================================================

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use wazito::app::{App, FormKind};
use wazito::config::Config;
use wazito::ui::events::{
    feature_from_event, get_char_from_event, is_backspace_event, is_buy_toggle_event,
    is_delete_event, is_down_event, is_edit_event, is_enter_event, is_escape_event,
    is_login_event, is_logout_event, is_next_field_event, is_previous_field_event,
    is_quit_event, is_sell_toggle_event, is_signup_event, is_tab_event, is_up_event,
    is_withdraw_event, Event,
};
use wazito::models::Feature;
use wazito::ui::{render, EventHandler};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ./logs/wazito.log.*
///
/// # Contrôler le niveau de log
/// RUST_LOG=wazito=trace cargo run
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = config.log_dir.clone();

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "wazito.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            // RUST_LOG prioritaire, sinon le filtre de la configuration
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    // La configuration d'abord : elle dit où écrire les logs
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    if let Some(e) = config_error {
        eprintln!("⚠️  Warning: {}", e);
        eprintln!("   Using default configuration...");
        warn!(error = %e, "Invalid configuration, using defaults");
    }

    info!(config_path = %Config::config_path().display(), "Wazito Coin starting up");

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let mut app = App::new(&config);
    let events = EventHandler::new(config.tick_rate());

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   1. Dessiner l'interface (render)
//   2. Traiter les événements (input)
//   3. Mettre à jour l'état (update)
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal
            .draw(|frame| render(frame, app))
            .context("Échec du rendu de l'interface")?;

        match events.next() {
            Ok(event) => handle_event(app, event),
            Err(e) => warn!(error = ?e, "Failed to read terminal event"),
        }

        app.tick();
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================
// CONCEPT : Deux modes
// - Mode saisie (un formulaire a le focus) : les touches vont au formulaire
// - Mode navigation : raccourcis à une lettre
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Tick => {}
        Event::Key(_) if app.is_editing() => handle_form_key(app, &event),
        Event::Key(_) => handle_navigation_key(app, &event),
    }
}

/// Touches envoyées au formulaire qui a le focus
fn handle_form_key(app: &mut App, event: &Event) {
    match event {
        _ if is_escape_event(event) => {
            debug!("User left form");
            app.unfocus();
        }

        _ if is_enter_event(event) => {
            info!(form = ?app.focus, "User submitted form");
            app.submit_focused();
        }

        // Ctrl+W dans le portefeuille : retrait (Enter fait le dépôt)
        _ if is_withdraw_event(event) && app.focus == Some(FormKind::Wallet) => {
            info!("User requested withdrawal");
            app.withdraw();
        }

        _ if is_next_field_event(event) => app.next_field(),
        _ if is_previous_field_event(event) => app.previous_field(),
        _ if is_backspace_event(event) => app.backspace(),

        _ => {
            if let Some(c) = get_char_from_event(event) {
                app.input_char(c);
            }
        }
    }
}

/// Raccourcis du mode navigation
fn handle_navigation_key(app: &mut App, event: &Event) {
    let on_offers = app.is_feature_active(Feature::CreateOffer);

    match event {
        // Touche 'q' : quit confirmation two-step
        _ if is_quit_event(event) => {
            app.cancel_delete();
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        // 'x' : supprimer l'offre sélectionnée (two-step)
        _ if is_delete_event(event) && on_offers && !app.offers.is_empty() => {
            app.cancel_quit();
            if app.is_awaiting_delete_confirmation() {
                info!(index = app.selected_offer, "User confirmed offer deletion");
                app.delete_selected_offer();
            } else {
                info!("User requested offer deletion (awaiting confirmation)");
                app.request_delete();
            }
        }

        _ => {
            // Toute autre touche annule les confirmations en attente
            app.cancel_quit();
            app.cancel_delete();
            handle_shortcut(app, event, on_offers);
        }
    }
}

fn handle_shortcut(app: &mut App, event: &Event, on_offers: bool) {
    let logged_in = app.session.is_logged_in();

    if let Some(feature) = feature_from_event(event) {
        // Dashboard n'est proposé dans le header qu'une fois connecté
        if !feature.requires_login() || logged_in {
            info!(feature = feature.title(), "User selected feature");
            app.select_feature(feature);
        }
        return;
    }

    match event {
        _ if is_login_event(event) && !logged_in => app.toggle_login_form(),
        _ if is_signup_event(event) && !logged_in => app.toggle_signup_form(),
        _ if is_logout_event(event) && logged_in => app.logout(),
        _ if is_buy_toggle_event(event) => app.toggle_buy_form(),
        _ if is_sell_toggle_event(event) => app.toggle_sell_form(),
        _ if is_tab_event(event) => app.focus_next_form(),

        // Liste des offres (seulement sur Create Offer)
        _ if is_up_event(event) && on_offers => app.navigate_up(),
        _ if is_down_event(event) && on_offers => app.navigate_down(),
        _ if is_edit_event(event) && on_offers => app.edit_selected_offer(),

        _ => {}
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
