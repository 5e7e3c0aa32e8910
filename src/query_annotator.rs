use crate::constants::PARAMETER_DELIMITERS;
use crate::constants::PARAMETER_SIGIL;
use crate::constants::QUOTE_CHARS;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::error::Result;
use log::debug;
use std::collections::BTreeSet;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ScanState {
    Normal,
    /// Inside a literal opened by the given quote character
    Quoted(char),
}

/// Collect the distinct `$name` parameters of a query.
///
/// Sigils inside `'...'` or `"..."` literals are ignored; only the quote
/// character that opened a literal closes it, and an unterminated literal
/// runs to the end of the query. A name runs from just after the sigil up to
/// the first delimiter (`,` `;` `)` `=` or whitespace), quote character,
/// or the end of the query. Anything else, `.` included, is part of the name.
///
/// A sigil with nothing after it is an [`ErrorKind::EmptyParameterName`] error.
pub fn extract_parameters(query: &str) -> Result<BTreeSet<String>> {
    let mut parameters = BTreeSet::new();
    let mut state = ScanState::Normal;
    let mut chars = query.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match state {
            ScanState::Quoted(quote) => {
                if c == quote {
                    state = ScanState::Normal;
                }
            }
            ScanState::Normal if QUOTE_CHARS.contains(&c) => {
                state = ScanState::Quoted(c);
            }
            ScanState::Normal if c == PARAMETER_SIGIL => {
                let start = offset + c.len_utf8();
                let mut end = query.len();
                // The terminating character is left for the next iteration
                while let Some(&(i, next)) = chars.peek() {
                    if ends_parameter_name(next) {
                        end = i;
                        break;
                    }
                    chars.next();
                }
                let name = &query[start..end];
                if name.is_empty() {
                    return Err(Error::new(
                        ErrorKind::EmptyParameterName,
                        format!(
                            "Parameter sigil {} at byte {} is not followed by a name in query {}",
                            PARAMETER_SIGIL, offset, query
                        ),
                    ));
                }
                parameters.insert(name.to_string());
            }
            ScanState::Normal => (),
        }
    }

    debug!("Query {} expects parameters {:?}", query, parameters);
    Ok(parameters)
}

fn ends_parameter_name(c: char) -> bool {
    PARAMETER_DELIMITERS.contains(&c) || c.is_whitespace() || QUOTE_CHARS.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &str) -> Vec<String> {
        extract_parameters(query).unwrap().into_iter().collect()
    }

    #[test]
    fn ignores_quoted_sigils() {
        assert_eq!(
            params("select * from t where name = '$x' and id = $id"),
            vec!["id"]
        );
        assert_eq!(params(r#"select "$a" from t where b = $b"#), vec!["b"]);
    }

    #[test]
    fn delimiters_end_names() {
        assert_eq!(
            params("insert into t (a,b) values ($a, $b)"),
            vec!["a", "b"]
        );
        assert_eq!(params("update t set a=$a,b=$b;"), vec!["a", "b"]);
        assert_eq!(params("select * from t where a=$x\n  and b=\t$y"), vec!["x", "y"]);
    }

    #[test]
    fn duplicates_collapse() {
        assert_eq!(params("select * from t where a = $x or b = $x"), vec!["x"]);
    }

    #[test]
    fn other_quote_style_does_not_close_literal() {
        assert_eq!(params(r#"select 'it"s $not' where a = $yes"#), vec!["yes"]);
        assert_eq!(params(r#"select "it's $not" where a = $yes"#), vec!["yes"]);
    }

    #[test]
    fn unterminated_literal_swallows_the_rest() {
        assert_eq!(params("select $a where b = 'oops $b"), vec!["a"]);
    }

    #[test]
    fn dots_belong_to_the_name() {
        assert_eq!(params("where a = $users.name"), vec!["users.name"]);
    }

    #[test]
    fn quote_ends_name_and_opens_literal() {
        assert_eq!(params("select $a'$b' || $c"), vec!["a", "c"]);
    }

    #[test]
    fn name_at_end_of_query() {
        assert_eq!(params("$only"), vec!["only"]);
        assert!(params("select 1").is_empty());
        assert!(params("").is_empty());
    }

    #[test]
    fn empty_name_is_an_error() {
        for query in &["select $", "values ($, $b)", "a = $ and b = 1", "x = $;"] {
            let err = extract_parameters(query).unwrap_err();
            assert_eq!(err.kind, ErrorKind::EmptyParameterName, "{}", query);
        }
    }

    #[test]
    fn empty_name_inside_literal_is_fine() {
        assert_eq!(params("select '$' where a = $a"), vec!["a"]);
    }

    #[test]
    fn non_ascii_text() {
        assert_eq!(params("select 'ünï $x' where é = $név"), vec!["név"]);
    }
}
