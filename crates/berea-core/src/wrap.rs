//! Greedy fixed-width line wrapping.

/// Column budget used for all rendered passages.
pub const WRAP_WIDTH: usize = 80;

/// Split `text` into lines of at most `width` characters, breaking at the
/// last space that leaves room for the break itself.
///
/// Whitespace at the start of each continuation line is dropped; whitespace
/// inside a line, and at the very end of the text, is kept as is. The final
/// line is always emitted, so empty input yields one empty line.
///
/// A token longer than the budget is cut hard at `width` characters rather
/// than producing an overlong line.
pub fn wrap(text: &str, width: usize) -> Vec<&str> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut rest = text;

    while rest.chars().count() > width {
        let window = &rest[..byte_offset(rest, width - 1)];
        let split = match window.rfind(' ') {
            Some(space) if space > 0 => space,
            _ => byte_offset(rest, width),
        };
        lines.push(&rest[..split]);
        rest = rest[split..].trim_start();
    }

    lines.push(rest);
    lines
}

/// Byte index of the `chars`-th character, or the end of `text`.
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
