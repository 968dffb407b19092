use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::PdfResult;

/// Inflates a `/FlateDecode` stream body. Calculator streams never carry a
/// predictor, so the zlib data is the whole story
pub fn decode_flate(buffer: &[u8]) -> PdfResult<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(buffer);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;

    Ok(out)
}
