use prost::{
    bytes::{Buf, BufMut},
    encoding::{self, DecodeContext, WireType},
    DecodeError, Message,
};

use super::in_field;

/// Input of the `GetBook` procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetBookRequest {
    /// ISBN matched against the ISBN of the books in the library
    pub isbn: i64,
}

impl GetBookRequest {
    const ISBN: u32 = 1;

    pub fn new(isbn: i64) -> Self {
        Self { isbn }
    }
}

impl Message for GetBookRequest {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        if self.isbn != 0 {
            encoding::int64::encode(Self::ISBN, &self.isbn, buf);
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
                .map_err(in_field("GetBookRequest", "isbn")),
            _ => encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        if self.isbn == 0 {
            0
        } else {
            encoding::int64::encoded_len(Self::ISBN, &self.isbn)
        }
    }

    fn clear(&mut self) {
        self.isbn = 0;
    }
}

/// Input of the `QueryBooks` procedure
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryBooksRequest {
    /// Prefix matched against the author of the books in the library
    pub author_prefix: String,
}

impl QueryBooksRequest {
    const AUTHOR_PREFIX: u32 = 1;

    pub fn new(author_prefix: impl Into<String>) -> Self {
        Self {
            author_prefix: author_prefix.into(),
        }
    }
}

impl Message for QueryBooksRequest {
    fn encode_raw<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        if !self.author_prefix.is_empty() {
            encoding::string::encode(Self::AUTHOR_PREFIX, &self.author_prefix, buf);
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
            Self::AUTHOR_PREFIX => {
                encoding::string::merge(wire_type, &mut self.author_prefix, buf, ctx)
                    .map_err(in_field("QueryBooksRequest", "author_prefix"))
            }
            _ => encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        if self.author_prefix.is_empty() {
            0
        } else {
            encoding::string::encoded_len(Self::AUTHOR_PREFIX, &self.author_prefix)
        }
    }

    fn clear(&mut self) {
        self.author_prefix.clear();
    }
}

#[cfg(test)]
mod tests {
    use prost::{
        encoding::{encode_key, encode_varint, WireType},
        Message,
    };

    use super::{GetBookRequest, QueryBooksRequest};

    #[test]
    fn test_get_book_request_wire_format() {
        let request = GetBookRequest::new(140008381);
        let bytes = request.encode_to_vec();

        assert_eq!(bytes, vec![0x08, 0xbd, 0xb7, 0xe1, 0x42]);
        assert_eq!(GetBookRequest::decode(bytes.as_slice()).unwrap(), request);
    }

    #[test]
    fn test_negative_isbn_is_plain_varint() {
        let request = GetBookRequest::new(-1);
        let bytes = request.encode_to_vec();

        // 1 byte of tag and the 10 bytes of a sign-extended varint
        assert_eq!(bytes.len(), 11);
        assert_eq!(GetBookRequest::decode(bytes.as_slice()).unwrap(), request);
    }

    #[test]
    fn test_query_books_request_roundtrip() {
        let request = QueryBooksRequest::new("J.R.R.");
        let bytes = request.encode_to_vec();

        assert_eq!(&bytes[..2], &[0x0a, 0x06]);
        assert_eq!(QueryBooksRequest::decode(bytes.as_slice()).unwrap(), request);
    }

    #[test]
    fn test_empty_requests_encode_to_nothing() {
        assert!(GetBookRequest::default().encode_to_vec().is_empty());
        assert!(QueryBooksRequest::default().encode_to_vec().is_empty());
        assert_eq!(
            QueryBooksRequest::decode(&[][..]).unwrap(),
            QueryBooksRequest::default()
        );
    }

    #[test]
    fn test_requests_skip_unknown_fields() {
        let mut bytes = Vec::new();
        encode_key(99, WireType::Varint, &mut bytes);
        encode_varint(1, &mut bytes);
        bytes.extend(GetBookRequest::new(42).encode_to_vec());

        assert_eq!(GetBookRequest::decode(bytes.as_slice()).unwrap().isbn, 42);
    }

    #[test]
    fn test_invalid_utf8_prefix_fails() {
        let bytes = vec![0x0a, 0x02, 0xff, 0xfe];
        assert!(QueryBooksRequest::decode(bytes.as_slice()).is_err());
    }
}
