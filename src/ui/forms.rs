// ============================================================================
// Formulaires - Rendu des champs de saisie
// ============================================================================
// Un même rendu sert à tous les formulaires (connexion, inscription,
// offre, portefeuille, achat, vente)
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::Form;

/// Lignes "Label: valeur" d'un formulaire
///
/// Si le formulaire a le focus, le champ courant est surligné
/// et suivi d'un curseur.
pub fn form_lines(form: &Form, focused: bool) -> Vec<Line<'static>> {
    form.fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let is_current = focused && index == form.focused_field;

            let label_style = if is_current {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![
                Span::styled(format!("{:<15}", format!("{}:", field.label)), label_style),
                Span::styled(field.display_value(), Style::default().fg(Color::White)),
            ];

            if is_current {
                spans.push(Span::styled(
                    "█",
                    Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
                ));
            }

            Line::from(spans)
        })
        .collect()
}

/// Bordure verte quand le formulaire reçoit les touches
pub fn form_block(title: String, focused: bool) -> Block<'static> {
    let color = if focused { Color::Green } else { Color::DarkGray };

    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

/// Hauteur nécessaire pour afficher un formulaire complet dans un bloc
pub fn form_height(form: &Form) -> u16 {
    form.fields.len() as u16 + 2
}

/// Dessine un formulaire seul dans sa propre zone
pub fn render_form(frame: &mut Frame, form: &Form, focused: bool, area: Rect) {
    let paragraph = Paragraph::new(form_lines(form, focused))
        .block(form_block(format!(" {} ", form.kind.title()), focused));

    frame.render_widget(paragraph, area);
}
