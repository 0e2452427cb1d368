use std::ops::RangeInclusive;

/// Book names (Almeida) and chapter counts, in canonical order.
const CATALOG: &[(&str, u32)] = &[
    ("Gênesis", 50),
    ("Êxodo", 40),
    ("Levítico", 27),
    ("Números", 36),
    ("Deuteronômio", 34),
    ("Josué", 24),
    ("Juízes", 21),
    ("Rute", 4),
    ("1 Samuel", 31),
    ("2 Samuel", 24),
    ("1 Reis", 22),
    ("2 Reis", 25),
    ("1 Crônicas", 29),
    ("2 Crônicas", 36),
    ("Esdras", 10),
    ("Neemias", 13),
    ("Ester", 10),
    ("Jó", 42),
    ("Salmos", 150),
    ("Provérbios", 31),
    ("Eclesiastes", 12),
    ("Cânticos", 8),
    ("Isaías", 66),
    ("Jeremias", 52),
    ("Lamentações", 5),
    ("Ezequiel", 48),
    ("Daniel", 12),
    ("Oséias", 14),
    ("Joel", 3),
    ("Amós", 9),
    ("Obadias", 1),
    ("Jonas", 4),
    ("Miquéias", 7),
    ("Naum", 3),
    ("Habacuque", 3),
    ("Sofonias", 3),
    ("Ageu", 2),
    ("Zacarias", 14),
    ("Malaquias", 4),
    ("Mateus", 28),
    ("Marcos", 16),
    ("Lucas", 24),
    ("João", 21),
    ("Atos", 28),
    ("Romanos", 16),
    ("1 Coríntios", 16),
    ("2 Coríntios", 13),
    ("Gálatas", 6),
    ("Efésios", 6),
    ("Filipenses", 4),
    ("Colossenses", 4),
    ("1 Tessalonicenses", 5),
    ("2 Tessalonicenses", 3),
    ("1 Timóteo", 6),
    ("2 Timóteo", 4),
    ("Tito", 3),
    ("Filemom", 1),
    ("Hebreus", 13),
    ("Tiago", 5),
    ("1 Pedro", 5),
    ("2 Pedro", 3),
    ("1 João", 5),
    ("2 João", 1),
    ("3 João", 1),
    ("Judas", 1),
    ("Apocalipse", 22),
];

/// All book names in canonical order
pub fn books() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(name, _)| *name)
}

pub fn chapters_in_book(book: &str) -> Option<u32> {
    CATALOG
        .iter()
        .find(|(name, _)| *name == book)
        .map(|(_, chapters)| *chapters)
}

/// Chapters a picker should offer for `book`; empty for unknown books.
pub fn chapter_range(book: &str) -> RangeInclusive<u32> {
    match chapters_in_book(book) {
        Some(n) => 1..=n,
        None => RangeInclusive::new(1, 0),
    }
}

/// Case-insensitive lookup returning the catalog spelling.
pub fn canonical_name(input: &str) -> Option<&'static str> {
    let wanted = input.trim().to_lowercase();
    books().find(|name| name.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_whole_canon() {
        assert_eq!(books().count(), 66);
        assert_eq!(books().next(), Some("Gênesis"));
        assert_eq!(books().last(), Some("Apocalipse"));
    }

    #[test]
    fn test_chapters_in_book() {
        assert_eq!(chapters_in_book("Salmos"), Some(150));
        assert_eq!(chapters_in_book("Judas"), Some(1));
        assert_eq!(chapters_in_book("Enoque"), None);
    }

    #[test]
    fn test_chapter_range() {
        assert_eq!(chapter_range("Rute"), 1..=4);
        assert!(chapter_range("Enoque").is_empty());
    }

    #[test]
    fn test_canonical_name_ignores_case() {
        assert_eq!(canonical_name("salmos"), Some("Salmos"));
        assert_eq!(canonical_name(" 1 JOÃO "), Some("1 João"));
        assert_eq!(canonical_name("Salmo"), None);
    }
}
