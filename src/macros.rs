#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a `LexRule` from a name, an anchored pattern and a production.
///
/// The production receives the matched lexeme and its byte offset and
/// returns `Ok(None)` for input that produces no token (whitespace).
macro_rules! lex_rule {
    (
        name: $name:expr,
        pattern: $pat:literal
        , prod: |$lexeme:ident : &str, $at:ident : usize| $body:block
        $(,)?
    ) => {{
        $crate::LexRule {
            name: $name,
            pattern: $crate::regex!($pat),
            production: Box::new(move |$lexeme: &str, $at: usize| -> Result<Option<$crate::TokenKind>, $crate::ParseError> {
                $body
            }),
        }
    }};
}
