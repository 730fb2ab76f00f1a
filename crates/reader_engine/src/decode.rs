use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// How far into a saved page the `<meta charset>` prescan looks.
const META_PRESCAN_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode page bytes as {encoding}")]
    Malformed { encoding: String },
}

/// Decode a saved page into UTF-8: BOM -> declared charset -> `<meta charset>` -> chardetng.
///
/// `declared_charset` is whatever the host reported alongside the page,
/// either a bare label or a full Content-Type value.
pub fn decode_html(bytes: &[u8], declared_charset: Option<&str>) -> Result<DecodedHtml, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    let declared = declared_charset
        .map(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()));
    if let Some(encoding) = declared.or_else(|| sniff_meta_charset(bytes)) {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guessed = detector.guess(None, true);
    decode_with(bytes, guessed)
}

fn charset_label(declared: &str) -> &str {
    declared
        .split(';')
        .map(str::trim)
        .find_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches(['"', '\'']))
        })
        .unwrap_or(declared.trim())
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_PRESCAN_BYTES)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    Encoding::for_label(label.as_bytes())
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedHtml, DecodeError> {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: used.name().to_string(),
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
    })
}
