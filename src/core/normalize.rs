//! Line-ending normalization applied to both sides of a header comparison.

use std::borrow::Cow;

/// Remove every carriage return, leaving all other characters in order.
///
/// Borrows the input when it contains no `\r`.
pub fn normalize(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.chars().filter(|&c| c != '\r').collect())
    } else {
        Cow::Borrowed(text)
    }
}
