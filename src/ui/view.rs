use crate::app::controllers::reading::{ReadingSession, ReadingState};
use crate::app::domain::books;
use crate::app::domain::preferences::{FontSize, Preferences};
use crate::app::state::Notice;

use super::theme::{palette, Palette};

/// Terminal columns standing in for the font size: larger text, shorter lines.
pub fn wrap_width(size: FontSize) -> usize {
    match size {
        FontSize::Pequena => 100,
        FontSize::Media => 80,
        FontSize::Grande => 60,
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn render_chapter(session: &ReadingSession, prefs: &Preferences) -> String {
    let p = palette(prefs.dark_mode);
    let width = wrap_width(prefs.font_size);

    match session.state() {
        ReadingState::Idle => p.paint(p.muted, "Selecione um livro (digite 'livros')."),
        ReadingState::BookSelected => {
            let book = session.book().unwrap_or_default();
            let chapters = books::chapters_in_book(book).unwrap_or(0);
            p.paint(
                p.muted,
                &format!("{book}: escolha um capítulo de 1 a {chapters}."),
            )
        }
        ReadingState::Loading => p.paint(p.muted, "Carregando versículos..."),
        ReadingState::Failed => p.paint(p.error, "Não foi possível carregar este capítulo."),
        ReadingState::Loaded => {
            let mut out = String::new();
            if let Some(pointer) = session.pointer() {
                out.push_str(&p.paint(p.primary, &format!("📘 {pointer}")));
                out.push('\n');
            }
            for verse in session.verses() {
                let number = format!("{:>3} ", verse.verse_number);
                let indent = " ".repeat(number.len());
                for (i, line) in wrap(&verse.text, width.saturating_sub(number.len())).iter().enumerate() {
                    if i == 0 {
                        out.push_str(&p.paint(p.primary, &number));
                    } else {
                        out.push_str(&indent);
                    }
                    out.push_str(&p.paint(p.text, line));
                    out.push('\n');
                }
            }
            out
        }
    }
}

pub fn render_favorites(entries: &[String], prefs: &Preferences) -> String {
    let p = palette(prefs.dark_mode);
    if entries.is_empty() {
        return p.paint(p.muted, "Nenhum versículo favorito ainda.");
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{} {}", p.paint(p.primary, &format!("{:>3}.", i + 1)), p.paint(p.text, entry.trim_end())))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_books() -> String {
    books::books()
        .map(|name| format!("{name} ({})", books::chapters_in_book(name).unwrap_or(0)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_status(session: &ReadingSession, prefs: &Preferences, favorites: usize) -> String {
    let reading = match session.pointer() {
        Some(pointer) => pointer.to_string(),
        None => session.book().unwrap_or("-").to_string(),
    };
    let last_read = session
        .last_read()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "Leitura: {reading} ({:?})\nÚltima leitura salva: {last_read}\nModo escuro: {}\nAba: {}\nFonte: {} ({}pt)\nFavoritos: {favorites}",
        session.state(),
        if prefs.dark_mode { "ativo" } else { "inativo" },
        prefs.last_tab.as_str(),
        prefs.font_size.as_str(),
        prefs.font_size.points(),
    )
}

pub fn render_notice(notice: &Notice, p: &Palette) -> String {
    match notice {
        Notice::Info(text) => p.paint(p.primary, &format!("• {text}")),
        Notice::Error(text) => p.paint(p.error, &format!("✕ {text}")),
    }
}
