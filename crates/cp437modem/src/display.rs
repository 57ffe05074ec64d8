//! Post-pass over decoded text for servers that clear the screen without
//! homing the cursor.

use alloc::{borrow::Cow, string::String};

/// Erase-in-display for the whole screen, `ESC [ 2 J`.
pub const CLEAR_SCREEN: &str = "\x1b[2J";
/// Cursor position with no parameters, `ESC [ H`.
pub const CURSOR_HOME: &str = "\x1b[H";

/// Inserts a cursor-home right after the first clear-screen that is not
/// immediately followed by one.
///
/// Many BBS systems send `ESC [ 2 J` alone and expect the terminal to home
/// the cursor as DOS ANSI.SYS did. Only the first such clear-screen in
/// `text` is patched; text without one is returned borrowed.
///
/// ```rust
/// use cp437modem::ensure_home_after_clear;
///
/// assert_eq!(ensure_home_after_clear("\x1b[2Jmenu"), "\x1b[2J\x1b[Hmenu");
/// assert_eq!(ensure_home_after_clear("\x1b[2J\x1b[Hmenu"), "\x1b[2J\x1b[Hmenu");
/// ```
#[must_use]
pub fn ensure_home_after_clear(text: &str) -> Cow<'_, str> {
    let mut from = 0;
    while let Some(offset) = text[from..].find(CLEAR_SCREEN) {
        let end = from + offset + CLEAR_SCREEN.len();
        if !text[end..].starts_with(CURSOR_HOME) {
            let mut patched = String::with_capacity(text.len() + CURSOR_HOME.len());
            patched.push_str(&text[..end]);
            patched.push_str(CURSOR_HOME);
            patched.push_str(&text[end..]);
            return Cow::Owned(patched);
        }
        from = end;
    }
    Cow::Borrowed(text)
}
