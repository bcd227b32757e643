use prost::{
    bytes::{Buf, BufMut},
    encoding::{self, DecodeContext, WireType},
    DecodeError, Message,
};
use prost_types::Timestamp;

use super::{in_field, BookType};

/// A book publisher
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Publisher {
    pub name: String,
}

impl Publisher {
    const NAME: u32 = 1;

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Message for Publisher {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        if !self.name.is_empty() {
            encoding::string::encode(Self::NAME, &self.name, buf);
        }
    }

    fn merge_field<B>(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError>
    where
        B: Buf,
    {
        match tag {
            Self::NAME => encoding::string::merge(wire_type, &mut self.name, buf, ctx)
                .map_err(in_field("Publisher", "name")),
            _ => encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        if self.name.is_empty() {
            0
        } else {
            encoding::string::encoded_len(Self::NAME, &self.name)
        }
    }

    fn clear(&mut self) {
        self.name.clear();
    }
}

/// How a [`Book`] reached the shelves. Only one of both can be set at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishingMethod {
    SelfPublished(bool),
    Publisher(Publisher),
}

/// A book in the library
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Book {
    pub isbn: i64,
    pub title: String,
    pub author: String,
    /// Raw [`BookType`] value. Kept as `i32` so values unknown to this client survive a decode.
    pub book_type: i32,
    /// `None` when the publishing method is unknown
    pub publishing_method: Option<PublishingMethod>,
    pub publication_date: Option<Timestamp>,
}

impl Book {
    const ISBN: u32 = 1;
    const TITLE: u32 = 2;
    const AUTHOR: u32 = 3;
    const BOOK_TYPE: u32 = 4;
    const SELF_PUBLISHED: u32 = 5;
    const PUBLISHER: u32 = 6;
    const PUBLICATION_DATE: u32 = 7;

    /// The book type, [`BookType::Hardcover`] if the raw value is unknown
    pub fn book_type(&self) -> BookType {
        BookType::from_i32(self.book_type).unwrap_or_default()
    }

    pub fn set_book_type(&mut self, value: BookType) {
        self.book_type = value as i32;
    }

    /// `false` unless the book is set as self published
    pub fn self_published(&self) -> bool {
        matches!(
            self.publishing_method,
            Some(PublishingMethod::SelfPublished(true))
        )
    }

    pub fn set_self_published(&mut self, value: bool) {
        self.publishing_method = Some(PublishingMethod::SelfPublished(value));
    }

    pub fn publisher(&self) -> Option<&Publisher> {
        match &self.publishing_method {
            Some(PublishingMethod::Publisher(publisher)) => Some(publisher),
            _ => None,
        }
    }

    pub fn set_publisher(&mut self, publisher: Publisher) {
        self.publishing_method = Some(PublishingMethod::Publisher(publisher));
    }

    fn merge_book_type<B: Buf>(
        &mut self,
        wire_type: WireType,
        buf: &mut B,
    ) -> Result<(), DecodeError> {
        encoding::check_wire_type(WireType::Varint, wire_type)?;
        // Negative enum values travel sign-extended to 64 bits
        let value = encoding::decode_varint(buf)? as i64;
        self.book_type =
            i32::try_from(value).map_err(|_| DecodeError::new("enum value overflows int32"))?;
        Ok(())
    }

    fn merge_self_published<B: Buf>(
        &mut self,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        let mut value = false;
        encoding::bool::merge(wire_type, &mut value, buf, ctx)?;
        self.publishing_method = Some(PublishingMethod::SelfPublished(value));
        Ok(())
    }

    fn merge_publisher<B: Buf>(
        &mut self,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        let field = &mut self.publishing_method;
        match field {
            // A second occurrence of the same branch merges into it
            Some(PublishingMethod::Publisher(publisher)) => {
                encoding::message::merge(wire_type, publisher, buf, ctx)
            }
            _ => {
                let mut publisher = Publisher::default();
                encoding::message::merge(wire_type, &mut publisher, buf, ctx)?;
                *field = Some(PublishingMethod::Publisher(publisher));
                Ok(())
            }
        }
    }
}

impl Message for Book {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        if self.isbn != 0 {
            encoding::int64::encode(Self::ISBN, &self.isbn, buf);
        }
        if !self.title.is_empty() {
            encoding::string::encode(Self::TITLE, &self.title, buf);
        }
        if !self.author.is_empty() {
            encoding::string::encode(Self::AUTHOR, &self.author, buf);
        }
        if self.book_type != BookType::default() as i32 {
            encoding::int32::encode(Self::BOOK_TYPE, &self.book_type, buf);
        }
        match &self.publishing_method {
            Some(PublishingMethod::SelfPublished(value)) => {
                encoding::bool::encode(Self::SELF_PUBLISHED, value, buf)
            }
            Some(PublishingMethod::Publisher(publisher)) => {
                encoding::message::encode(Self::PUBLISHER, publisher, buf)
            }
            None => {}
        }
        if let Some(publication_date) = &self.publication_date {
            encoding::message::encode(Self::PUBLICATION_DATE, publication_date, buf);
        }
    }

    fn merge_field<B>(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError>
    where
        B: Buf,
    {
        match tag {
            Self::ISBN => encoding::int64::merge(wire_type, &mut self.isbn, buf, ctx)
                .map_err(in_field("Book", "isbn")),
            Self::TITLE => encoding::string::merge(wire_type, &mut self.title, buf, ctx)
                .map_err(in_field("Book", "title")),
            Self::AUTHOR => encoding::string::merge(wire_type, &mut self.author, buf, ctx)
                .map_err(in_field("Book", "author")),
            Self::BOOK_TYPE => self
                .merge_book_type(wire_type, buf)
                .map_err(in_field("Book", "book_type")),
            Self::SELF_PUBLISHED => self
                .merge_self_published(wire_type, buf, ctx)
                .map_err(in_field("Book", "self_published")),
            Self::PUBLISHER => self
                .merge_publisher(wire_type, buf, ctx)
                .map_err(in_field("Book", "publisher")),
            Self::PUBLICATION_DATE => encoding::message::merge(
                wire_type,
                self.publication_date.get_or_insert_with(Timestamp::default),
                buf,
                ctx,
            )
            .map_err(in_field("Book", "publication_date")),
            _ => encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.isbn != 0 {
            len += encoding::int64::encoded_len(Self::ISBN, &self.isbn);
        }
        if !self.title.is_empty() {
            len += encoding::string::encoded_len(Self::TITLE, &self.title);
        }
        if !self.author.is_empty() {
            len += encoding::string::encoded_len(Self::AUTHOR, &self.author);
        }
        if self.book_type != BookType::default() as i32 {
            len += encoding::int32::encoded_len(Self::BOOK_TYPE, &self.book_type);
        }
        len += match &self.publishing_method {
            Some(PublishingMethod::SelfPublished(value)) => {
                encoding::bool::encoded_len(Self::SELF_PUBLISHED, value)
            }
            Some(PublishingMethod::Publisher(publisher)) => {
                encoding::message::encoded_len(Self::PUBLISHER, publisher)
            }
            None => 0,
        };
        if let Some(publication_date) = &self.publication_date {
            len += encoding::message::encoded_len(Self::PUBLICATION_DATE, publication_date);
        }
        len
    }

    fn clear(&mut self) {
        self.isbn = 0;
        self.title.clear();
        self.author.clear();
        self.book_type = BookType::default() as i32;
        self.publishing_method = None;
        self.publication_date = None;
    }
}
