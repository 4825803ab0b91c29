use regex::Regex;
use std::sync::LazyLock;

use crate::core::errors::FieldError;
use crate::core::record::StockState;

const IN_STOCK: &str = "In stock";
const RATING_MARKER: &str = "star-rating";
const RATING_WORDS: [&str; 6] = ["Zero", "One", "Two", "Three", "Four", "Five"];

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Classifies raw availability text. `None` means the availability element
/// was absent from the page.
pub fn classify_stock(raw: Option<&str>) -> StockState {
    let Some(raw) = raw else {
        return StockState::Unknown;
    };

    let head = match raw.find('(') {
        Some(pos) => &raw[..pos],
        None => raw,
    };

    if head.trim() == IN_STOCK {
        StockState::InStock
    } else {
        StockState::OutOfStock
    }
}

/// First run of decimal digits in `raw`, or 0 when there is none or it does
/// not fit a `u32`.
pub fn extract_available(raw: &str) -> u32 {
    DIGITS
        .find(raw)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Decodes a class attribute such as `"star-rating Three"` into 0..=5.
pub fn decode_rating(class_attr: &str) -> Result<u8, FieldError> {
    let unparseable = || FieldError::UnparseableValue {
        field: "rating",
        value: class_attr.to_string(),
    };

    let mut words = class_attr
        .split_whitespace()
        .filter(|token| *token != RATING_MARKER);

    let word = words.next().ok_or_else(unparseable)?;
    if words.next().is_some() {
        return Err(unparseable());
    }

    RATING_WORDS
        .iter()
        .position(|known| known.eq_ignore_ascii_case(word))
        .map(|n| n as u8)
        .ok_or_else(unparseable)
}

/// Canonical word for a rating, as the catalog renders it.
pub fn encode_rating(rating: u8) -> Option<&'static str> {
    RATING_WORDS.get(rating as usize).copied()
}

/// Trims passthrough text. `None` means the element was absent.
pub fn text_field(field: &'static str, raw: Option<String>) -> Result<String, FieldError> {
    raw.map(|text| text.trim().to_string())
        .ok_or(FieldError::MissingField { field })
}

/// Like [`text_field`], but the trimmed text must not be empty.
pub fn required_text_field(
    field: &'static str,
    raw: Option<String>,
) -> Result<String, FieldError> {
    let text = text_field(field, raw)?;
    if text.is_empty() {
        return Err(FieldError::UnparseableValue {
            field,
            value: text,
        });
    }
    Ok(text)
}
