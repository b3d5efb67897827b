//! Syntactic token classification.

/// Token after which every remaining token is positional.
pub const END_OF_OPTIONS: &str = "--";

/// Splits a token that looks like a flag into its key and attached remainder.
///
/// Purely syntactic; no schema lookup happens here.
///
/// - `-`, `+` and `--` are returned unchanged with an empty remainder.
/// - `--name=value` splits on the first `=`.
/// - `-xrest` and `+xrest` split after the first two characters.
/// - Anything else is returned unchanged.
///
/// # Examples
///
/// ```
/// use argbind_core::chop_token;
///
/// assert_eq!(chop_token("--count=3"), ("--count", "3"));
/// assert_eq!(chop_token("-abc"), ("-a", "bc"));
/// assert_eq!(chop_token("+a-3"), ("+a", "-3"));
/// assert_eq!(chop_token("file.txt"), ("file.txt", ""));
/// ```
pub fn chop_token(token: &str) -> (&str, &str) {
    match token {
        "-" | "+" | END_OF_OPTIONS => (token, ""),
        _ if token.starts_with("--") => token.split_once('=').unwrap_or((token, "")),
        _ if token.starts_with(['-', '+']) => {
            let split = token
                .char_indices()
                .nth(2)
                .map_or(token.len(), |(idx, _)| idx);
            token.split_at(split)
        }
        _ => (token, ""),
    }
}
