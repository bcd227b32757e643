use std::fmt;

/// The different kinds of book the library holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(i32)]
pub enum BookType {
    /// A book with a hard back
    #[default]
    Hardcover = 0,
    /// A book with a soft back
    Paperback = 1,
    /// An audio recording of the book
    Audiobook = 2,
}

impl BookType {
    /// Name of the value as written in the schema
    pub fn as_str_name(&self) -> &'static str {
        match self {
            BookType::Hardcover => "HARDCOVER",
            BookType::Paperback => "PAPERBACK",
            BookType::Audiobook => "AUDIOBOOK",
        }
    }

    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "HARDCOVER" => Some(Self::Hardcover),
            "PAPERBACK" => Some(Self::Paperback),
            "AUDIOBOOK" => Some(Self::Audiobook),
            _ => None,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Hardcover),
            1 => Some(Self::Paperback),
            2 => Some(Self::Audiobook),
            _ => None,
        }
    }

    pub fn is_valid(value: i32) -> bool {
        Self::from_i32(value).is_some()
    }
}

impl From<BookType> for i32 {
    fn from(value: BookType) -> i32 {
        value as i32
    }
}

impl fmt::Display for BookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

#[cfg(test)]
mod tests {
    use super::BookType;

    #[test]
    fn test_names_and_values_match() {
        for book_type in [BookType::Hardcover, BookType::Paperback, BookType::Audiobook] {
            assert_eq!(BookType::from_str_name(book_type.as_str_name()), Some(book_type));
            assert_eq!(BookType::from_i32(book_type as i32), Some(book_type));
        }
        assert_eq!(BookType::from_str_name("EBOOK"), None);
        assert!(!BookType::is_valid(3));
        assert_eq!(i32::from(BookType::Audiobook), 2);
    }
}
