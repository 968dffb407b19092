use std::borrow::Cow;

use calculator_macro::keyword_enum;

use crate::error::{ParseError, PdfResult};

pub mod ascii;
pub mod flate;

/// Applies `filters` to a stream body in order
pub fn decode_stream<'a>(stream: &'a [u8], filters: &[FilterKind]) -> PdfResult<Cow<'a, [u8]>> {
    if filters.is_empty() {
        return Ok(Cow::Borrowed(stream));
    }

    let mut stream = stream.to_vec();

    for filter in filters {
        log::debug!("applying /{} to {} bytes", filter, stream.len());

        stream = match filter {
            FilterKind::AsciiHex => ascii::decode_ascii_hex(&stream)?,
            FilterKind::Flate => flate::decode_flate(&stream)?,
        };
    }

    Ok(Cow::Owned(stream))
}

/// The stream filters a calculator program may be encoded with
#[keyword_enum]
pub enum FilterKind {
    /// Decodes data encoded in an ASCII hexadecimal representation, reproducing
    /// the original binary data
    AsciiHex = "ASCIIHexDecode",

    /// Decompresses data encoded using the zlib/deflate compression method,
    /// reproducing the original text or binary data
    Flate = "FlateDecode",
}

impl FilterKind {
    pub fn from_name(name: &str) -> PdfResult<Self> {
        match Self::from_keyword(name.as_bytes()) {
            Some(filter) => Ok(filter),
            None => anyhow::bail!(ParseError::UnrecognizedVariant {
                ty: "FilterKind",
                found: name.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use flate2::{write::ZlibEncoder, Compression};

    use super::*;

    #[test]
    fn no_filters_borrows() {
        let decoded = decode_stream(b"{ }", &[]).unwrap();

        assert!(matches!(decoded, Cow::Borrowed(b"{ }")));
    }

    #[test]
    fn filters_apply_in_order() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"{ 2 sqrt }").unwrap();
        let compressed = encoder.finish().unwrap();

        let hex = compressed
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>()
            + ">";

        let decoded = decode_stream(
            hex.as_bytes(),
            &[FilterKind::AsciiHex, FilterKind::Flate],
        )
        .unwrap();

        assert_eq!(&*decoded, b"{ 2 sqrt }");
    }

    #[test]
    fn filter_names() {
        assert_eq!(
            FilterKind::from_name("FlateDecode").unwrap(),
            FilterKind::Flate
        );
        assert_eq!(
            FilterKind::from_name("ASCIIHexDecode").unwrap(),
            FilterKind::AsciiHex
        );

        let err = FilterKind::from_name("LZWDecode").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::UnrecognizedVariant { .. })
        ));
    }
}
