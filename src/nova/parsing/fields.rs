//! Field declarations: `[visibility] type name[;]`

use crate::nova::converting::builtins::canonical_type;
use crate::nova::model::{FieldDeclaration, FieldEntry, Visibility};

/// Read a field-shaped line.
///
/// The visibility defaults to `private`. A line with a modifier but no
/// identifier becomes [`FieldEntry::Invalid`].
pub fn parse_field(line: &str) -> FieldEntry {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let (visibility, rest) = match parts.split_first() {
        Some((first, rest)) => match Visibility::from_keyword(first) {
            Some(visibility) => (visibility, rest),
            None => (Visibility::default(), &parts[..]),
        },
        None => (Visibility::default(), &parts[..]),
    };

    match rest {
        [ty, name, ..] => FieldEntry::Declaration(FieldDeclaration {
            visibility,
            ty: canonical_type(ty),
            name: name.trim_end_matches(';').to_string(),
        }),
        _ => FieldEntry::Invalid {
            line: line.to_string(),
        },
    }
}
