// ============================================================================
// Panneaux de contenu
// ============================================================================
// Panneau de la feature active (Create Offer, Wallet, Become a Vendor),
// panneau Buy/Sell et colonne latérale (About / News)
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FormKind};
use crate::models::Feature;
use crate::ui::forms::{form_block, form_height, form_lines, render_form};

const ABOUT_TEXT: [&str; 4] = [
    "Wazito Coin is a leading digital cryptocurrency exchange platform that provides a secure and \
     user-friendly environment for buying, selling, and trading various cryptocurrencies. Our \
     mission is to make cryptocurrency trading accessible to everyone, from seasoned investors to \
     newcomers in the world of digital assets.",
    "At Wazito Coin, we prioritize transparency, security, and convenience. Our cutting-edge \
     technology and robust security measures ensure that your transactions are safe and your \
     digital assets are protected. We offer a wide range of cryptocurrencies, including Bitcoin, \
     Ethereum, Litecoin, and many more, allowing you to diversify your portfolio and explore new \
     investment opportunities.",
    "Our user-friendly interface and intuitive platform make it easy for beginners to navigate the \
     world of cryptocurrency trading, while offering advanced tools and features for experienced \
     traders. Whether you're looking to buy, sell, or trade cryptocurrencies, Wazito Coin is your \
     trusted partner in the digital asset market.",
    "Join our growing community of cryptocurrency enthusiasts and stay up-to-date with the latest \
     market trends, news, and analysis. At Wazito Coin, we are committed to providing exceptional \
     service and empowering our users to unlock the full potential of the cryptocurrency \
     revolution.",
];

fn section_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title))
}

fn hint(key: &'static str, label: &'static str) -> Vec<Span<'static>> {
    vec![
        Span::styled(key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(label),
    ]
}

// ============================================================================
// Panneau de la feature active
// ============================================================================

/// Dessine le panneau correspondant à la feature active
///
/// Dashboard n'a pas de panneau propre : le bloc de bienvenue est
/// toujours affiché au-dessus.
pub fn render_feature_panel(frame: &mut Frame, app: &App, area: Rect) {
    match app.session.active_feature() {
        Some(Feature::CreateOffer) => render_create_offer(frame, app, area),
        Some(Feature::Wallet) => render_wallet(frame, app, area),
        Some(Feature::BecomeVendor) => render_become_vendor(frame, area),
        Some(Feature::Dashboard) | None => {}
    }
}

fn render_create_offer(frame: &mut Frame, app: &App, area: Rect) {
    let block = section_block(Feature::CreateOffer.title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                          // Description
            Constraint::Min(0),                             // Liste des offres
            Constraint::Length(form_height(&app.offer_form)), // Formulaire
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new("This section allows users to create offers."),
        chunks[0],
    );

    // Liste des offres
    let list_block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Offers ({}) ", app.offers.len()));

    if app.offers.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "No offers yet",
            Style::default().fg(Color::Gray),
        )))
        .block(list_block);
        frame.render_widget(paragraph, chunks[1]);
    } else {
        let items: Vec<ListItem> = app
            .offers
            .iter()
            .map(|offer| {
                let line = format!(
                    " #{:<3} {:<20} {:>8}  by {:<12} {}",
                    offer.id,
                    offer.title,
                    offer.price,
                    offer.creator,
                    offer.last_changed_at().format("%H:%M")
                );

                let style = if app.editing_offer == Some(offer.id) {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };

                ListItem::new(line).style(style)
            })
            .collect();

        // CONCEPT RUST : ListState
        // - ratatui garde l'offset de défilement dans l'état, pas dans le widget
        // - render_stateful_widget fait défiler la liste pour suivre la sélection
        let mut state = ListState::default().with_selected(Some(app.selected_offer));
        let list = List::new(items)
            .block(list_block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    let focused = app.focus == Some(FormKind::Offer);
    let title = match app.editing_offer {
        Some(id) => format!(" Edit Offer #{} ", id),
        None => format!(" {} ", FormKind::Offer.title()),
    };
    let paragraph =
        Paragraph::new(form_lines(&app.offer_form, focused)).block(form_block(title, focused));
    frame.render_widget(paragraph, chunks[2]);
}

fn render_wallet(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Some(FormKind::Wallet);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Current Balance: "),
            Span::styled(
                format!("${}", app.session.wallet_balance()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];
    lines.extend(form_lines(&app.wallet_form, focused));

    let mut help = Vec::new();
    if focused {
        help.extend(hint("[Enter]", " Deposit  "));
        help.extend(hint("[Ctrl+W]", " Withdraw"));
    } else {
        help.extend(hint("[Tab]", " Enter an amount"));
    }
    lines.push(Line::from(help));

    let block = section_block(Feature::Wallet.title()).border_style(Style::default().fg(if focused {
        Color::Green
    } else {
        Color::Cyan
    }));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_become_vendor(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("This section provides information on becoming a vendor.")
        .block(section_block(Feature::BecomeVendor.title()))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Panneau Buy/Sell
// ============================================================================

/// Hauteur du panneau Buy/Sell selon les formulaires affichés
pub fn buy_sell_height(app: &App) -> u16 {
    // Ligne du raccourci, puis ligne vide + un champ par ligne
    let lines = if app.buy_form_visible || app.sell_form_visible {
        2 + app.buy_form.fields.len() as u16
    } else {
        1
    };

    // Bordures du bloc de chaque colonne + bordures du panneau
    lines + 2 + 2
}

pub fn render_buy_sell(frame: &mut Frame, app: &App, area: Rect) {
    let block = section_block("Buy/Sell Cryptocurrency");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    render_order_column(frame, app, FormKind::Buy, columns[0]);
    render_order_column(frame, app, FormKind::Sell, columns[1]);
}

fn render_order_column(frame: &mut Frame, app: &App, kind: FormKind, area: Rect) {
    let (title, key, visible) = match kind {
        FormKind::Buy => ("Buy Cryptocurrency", "[b]", app.buy_form_visible),
        _ => ("Sell Cryptocurrency", "[v]", app.sell_form_visible),
    };
    let focused = app.focus == Some(kind);

    let toggle_label = match (kind, visible) {
        (FormKind::Buy, true) => " Hide Buy Form",
        (FormKind::Buy, false) => " Show Buy Form",
        (_, true) => " Hide Sell Form",
        (_, false) => " Show Sell Form",
    };

    let mut lines = vec![Line::from(hint(key, toggle_label))];
    if visible {
        lines.push(Line::from(""));
        lines.extend(form_lines(app.form(kind), focused));
    }

    let paragraph = Paragraph::new(lines).block(form_block(format!(" {} ", title), focused));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Colonne latérale
// ============================================================================

pub fn render_side(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4), Constraint::Length(1)])
        .split(area);

    let mut about = Vec::new();
    for (index, paragraph) in ABOUT_TEXT.iter().enumerate() {
        if index > 0 {
            about.push(Line::from(""));
        }
        about.push(Line::from(*paragraph));
    }

    frame.render_widget(
        Paragraph::new(about)
            .block(section_block("About Wazito Coin"))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new("Stay updated with the latest news in the cryptocurrency world.")
            .block(section_block("Latest News"))
            .wrap(Wrap { trim: true }),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            "© 2024 Wazito Coin. All rights reserved.",
            Style::default().fg(Color::DarkGray),
        )),
        chunks[2],
    );
}

/// Formulaire de connexion ou d'inscription sous le header
pub fn render_auth_form(frame: &mut Frame, app: &App, area: Rect) {
    let kind = if app.session.is_login_form_visible() {
        FormKind::Login
    } else {
        FormKind::SignUp
    };

    render_form(frame, app.form(kind), app.focus == Some(kind), area);
}
