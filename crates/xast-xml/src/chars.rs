//! Character classes from [XML 1.0 § 2.3 Common Syntactic Constructs](https://www.w3.org/TR/xml/#sec-common-syn).
//!
//! Shared by the tokenizer and the doctype grammar.

/// [§ 2.3 S](https://www.w3.org/TR/xml/#NT-S)
///
/// "S ::= (#x20 | #x9 | #xD | #xA)+"
pub(crate) const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Either quote that may delimit a literal or attribute value.
pub(crate) const fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'')
}

/// [§ 2.3 NameStartChar](https://www.w3.org/TR/xml/#NT-NameStartChar)
pub(crate) const fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}'
    )
}

/// [§ 2.3 NameChar](https://www.w3.org/TR/xml/#NT-NameChar)
pub(crate) const fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}'
        )
}

/// [§ 2.3 PubidChar](https://www.w3.org/TR/xml/#NT-PubidChar)
///
/// "PubidChar ::= #x20 | #xD | #xA | [a-zA-Z0-9] | [-'()+,./:=?;!*#@$_%]"
pub(crate) const fn is_pubid_char(c: char) -> bool {
    matches!(c,
        ' ' | '\r' | '\n'
        | 'a'..='z' | 'A'..='Z' | '0'..='9'
        | '-' | '\'' | '(' | ')' | '+' | ',' | '.' | '/' | ':'
        | '=' | '?' | ';' | '!' | '*' | '#' | '@' | '$' | '_' | '%'
    )
}

/// First character of an entity reference: a name start, or `#` so that a
/// character reference is read whole before it is rejected.
pub(crate) const fn is_entity_start_char(c: char) -> bool {
    c == '#' || is_name_start_char(c)
}

/// Any later character of an entity reference.
pub(crate) const fn is_entity_char(c: char) -> bool {
    c == '#' || is_name_char(c)
}
