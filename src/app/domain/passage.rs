use serde::{Deserialize, Deserializer, Serialize};

/// A single verse as returned by the content provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub book_name: String,
    pub chapter: u32,
    #[serde(rename = "verse")]
    pub verse_number: u32,
    pub text: String,
}

impl Verse {
    /// Formatted favorite entry: `"<book> <chapter>:<verse> - <text>"`.
    pub fn favorite_entry(&self) -> String {
        format!(
            "{} {}:{} - {}",
            self.book_name,
            self.chapter,
            self.verse_number,
            self.text
        )
    }
}

/// Verses of the chapter currently being read, in provider order.
pub type VerseCollection = Vec<Verse>;

/// The (book, chapter) the user last viewed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReadingPointer {
    pub book: String,
    pub chapter: u32,
}

impl ReadingPointer {
    pub fn new(book: impl Into<String>, chapter: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
        }
    }
}

impl std::fmt::Display for ReadingPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)
    }
}

/// On-disk shape of `lastRead`. Older records stored the chapter as a string
/// and may carry a null book.
#[derive(Debug, Deserialize)]
struct LastReadRecord {
    #[serde(default)]
    book: Option<String>,
    #[serde(default, deserialize_with = "lenient_chapter")]
    chapter: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChapterRepr {
    Number(u32),
    Text(String),
}

fn lenient_chapter<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<ChapterRepr>::deserialize(deserializer)?;
    Ok(match repr {
        Some(ChapterRepr::Number(n)) => Some(n),
        Some(ChapterRepr::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

impl ReadingPointer {
    /// Decode a `lastRead` record. Returns `Ok(None)` when the record is well
    /// formed but does not name both a book and a positive chapter.
    pub fn from_record(json: &str) -> serde_json::Result<Option<ReadingPointer>> {
        let record: LastReadRecord = serde_json::from_str(json)?;
        Ok(match (record.book, record.chapter) {
            (Some(book), Some(chapter)) if !book.trim().is_empty() && chapter > 0 => {
                Some(ReadingPointer { book, chapter })
            }
            _ => None,
        })
    }

    pub fn to_record(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(n: u32, text: &str) -> Verse {
        Verse {
            book_name: "Salmos".to_string(),
            chapter: 23,
            verse_number: n,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_favorite_entry_keeps_provider_text() {
        let v = verse(1, "O Senhor é o meu pastor; nada me faltará.\n");
        assert_eq!(
            v.favorite_entry(),
            "Salmos 23:1 - O Senhor é o meu pastor; nada me faltará.\n"
        );
    }

    #[test]
    fn test_verse_reads_provider_field_names() {
        let json = r#"{"book_id":"PSA","book_name":"Salmos","chapter":23,"verse":2,"text":"Deitar-me faz"}"#;
        let v: Verse = serde_json::from_str(json).unwrap();
        assert_eq!(v.verse_number, 2);
        assert_eq!(v.book_name, "Salmos");
    }

    #[test]
    fn test_pointer_record_shape() {
        let json = ReadingPointer::new("Salmos", 23).to_record().unwrap();
        assert_eq!(json, r#"{"book":"Salmos","chapter":23}"#);
    }

    #[test]
    fn test_pointer_accepts_string_chapter() {
        let pointer = ReadingPointer::from_record(r#"{"book":"João","chapter":"3"}"#).unwrap();
        assert_eq!(pointer, Some(ReadingPointer::new("João", 3)));
    }

    #[test]
    fn test_pointer_without_book_is_ignored() {
        assert_eq!(
            ReadingPointer::from_record(r#"{"book":null,"chapter":4}"#).unwrap(),
            None
        );
        assert_eq!(ReadingPointer::from_record(r#"{"book":"Rute"}"#).unwrap(), None);
        assert_eq!(
            ReadingPointer::from_record(r#"{"book":"Rute","chapter":"x"}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_malformed_pointer_record_is_an_error() {
        assert!(ReadingPointer::from_record("{book:").is_err());
    }
}
