use crate::foundation::error::{HandwriteError, HandwriteResult};

pub(super) fn decode(bytes: &[u8]) -> HandwriteResult<String> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| HandwriteError::input(format!("document is not valid UTF-8: {e}")))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    Ok(text.replace("\r\n", "\n"))
}

#[cfg(test)]
#[path = "../../tests/unit/document/plain.rs"]
mod tests;
