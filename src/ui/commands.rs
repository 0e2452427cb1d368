use crate::app::domain::books::{canonical_name, chapter_range};
use crate::app::domain::messages::Message;
use crate::app::domain::preferences::{FontSize, Tab};

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone)]
pub enum Command {
    App(Message),
    ListBooks,
    ListFavorites,
    /// 1-based position in the favorites listing
    RemoveFavoriteAt(usize),
    Status,
    WipeRequested,
    Help,
    Quit,
}

pub const HELP: &str = "\
Comandos:
  livros                 lista os livros e número de capítulos
  livro <nome>           seleciona um livro (ex.: livro Salmos)
  cap <n>                seleciona um capítulo do livro atual
  fav <versículo>        marca um versículo do capítulo como favorito
  favoritos              lista os favoritos
  desfav <n>             remove o favorito número <n>
  escuro on|off          liga ou desliga o modo escuro
  aba <nome>             bible, planner, favorites, settings, login
  fonte <tamanho>        pequena, média ou grande
  status                 mostra a leitura e as preferências atuais
  limpar                 apaga todos os dados (pede confirmação)
  ajuda                  mostra esta ajuda
  sair                   encerra";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "livros" | "books" => Command::ListBooks,
        "livro" | "book" => {
            let book = canonical_name(rest)
                .ok_or_else(|| format!("Livro desconhecido: {:?}", rest))?;
            Command::App(Message::SelectBook(book.to_string()))
        }
        "cap" | "capitulo" | "capítulo" | "chapter" => {
            Command::App(Message::SelectChapter(parse_number(rest, "capítulo")?))
        }
        "fav" => Command::App(Message::FavoriteVerse(parse_number(rest, "versículo")?)),
        "favoritos" | "favorites" => Command::ListFavorites,
        "desfav" | "unfav" => {
            let index = parse_number(rest, "favorito")?;
            Command::RemoveFavoriteAt(index as usize)
        }
        "escuro" | "dark" => match rest.to_lowercase().as_str() {
            "on" | "sim" => Command::App(Message::SetDarkMode(true)),
            "off" | "nao" | "não" => Command::App(Message::SetDarkMode(false)),
            "" => Command::App(Message::ToggleDarkMode),
            other => return Err(format!("Use on ou off, não {:?}", other)),
        },
        "aba" | "tab" => {
            let tab = Tab::from_str(&rest.to_lowercase())
                .ok_or_else(|| format!("Aba desconhecida: {:?}", rest))?;
            Command::App(Message::SetTab(tab))
        }
        "fonte" | "font" => {
            let wanted = rest.to_lowercase();
            let size = FontSize::all()
                .iter()
                .copied()
                .find(|s| s.as_str() == wanted || (wanted == "media" && *s == FontSize::Media))
                .ok_or_else(|| format!("Tamanho desconhecido: {:?}", rest))?;
            Command::App(Message::SetFontSize(size))
        }
        "status" => Command::Status,
        "limpar" | "wipe" => Command::WipeRequested,
        "ajuda" | "help" | "?" => Command::Help,
        "sair" | "quit" | "exit" => Command::Quit,
        other => return Err(format!("Comando desconhecido: {:?}. Digite 'ajuda'.", other)),
    };

    Ok(Some(command))
}

fn parse_number(input: &str, what: &str) -> Result<u32, String> {
    input
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("Número de {} inválido: {:?}", what, input))
}

/// Reject a chapter the selected book does not have. Without a book the
/// session itself answers.
pub fn check_chapter(book: Option<&str>, chapter: u32) -> Result<(), String> {
    let Some(book) = book else {
        return Ok(());
    };
    let range = chapter_range(book);
    if range.contains(&chapter) {
        Ok(())
    } else {
        Err(format!(
            "{book} tem capítulos de {} a {}.",
            range.start(),
            range.end()
        ))
    }
}

/// Accepts "s", "sim", "y" and "yes" as confirmation.
pub fn is_confirmation(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes")
}
