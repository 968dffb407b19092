use crate::error::PdfResult;

/// Whitespace is ignored and `>` ends the data. A final odd digit behaves as
/// if it were followed by `0`
pub(crate) fn decode_ascii_hex(stream: &[u8]) -> PdfResult<Vec<u8>> {
    let mut buffer = Vec::with_capacity(stream.len() / 2);
    let mut high_nibble = None;

    for &b in stream {
        let nibble = match b {
            b'0'..=b'9' => b - b'0',
            b'A'..=b'F' => b - b'A' + 10,
            b'a'..=b'f' => b - b'a' + 10,
            b'>' => break,
            b'\0' | b'\t' | b'\n' | b'\x0C' | b'\r' | b' ' => continue,
            b => anyhow::bail!("invalid byte in /ASCIIHexDecode stream: {:#04x}", b),
        };

        match high_nibble.take() {
            Some(high) => buffer.push((high << 4) | nibble),
            None => high_nibble = Some(nibble),
        }
    }

    if let Some(high) = high_nibble {
        buffer.push(high << 4);
    }

    Ok(buffer)
}
