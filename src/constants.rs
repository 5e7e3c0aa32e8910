// Characters the query annotator cares about. These are "convention over configuration".

/// Introduces a named parameter in query text, e.g. `$name`.
pub const PARAMETER_SIGIL: char = '$';

pub const QUOTE_CHARS: &[char] = &['\'', '"'];

/// Characters that end a parameter name. Whitespace of any kind ends it as well.
pub const PARAMETER_DELIMITERS: &[char] = &[',', ' ', ';', ')', '='];

pub const WITHOUT_ROWID_SUFFIX: &str = " WITHOUT ROWID";
