//! Entity reference resolution.
//!
//! [XML 1.0 § 4.1 Character and Entity References](https://www.w3.org/TR/xml/#sec-references)
//!
//! Only the five predefined entities are understood. Character references
//! (`&#65;`, `&#x41;`) and entities declared in a DTD are rejected.

/// [§ 4.6 Predefined Entities](https://www.w3.org/TR/xml/#sec-predefined-ent)
const PREDEFINED_ENTITIES: [(&str, char); 5] = [
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
];

fn predefined(name: &str) -> Option<char> {
    PREDEFINED_ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|&(_, c)| c)
}

/// Resolve the text between `&` and `;`.
///
/// Predefined names match exactly or after lowercasing (`&AMP;` is accepted).
/// Returns `None` for anything else, numeric references included.
pub(crate) fn resolve_entity(entity: &str) -> Option<char> {
    predefined(entity).or_else(|| predefined(&entity.to_lowercase()))
}
