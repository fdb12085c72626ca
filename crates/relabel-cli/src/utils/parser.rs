use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Parses a single chain identifier: exactly one printable ASCII character.
pub fn parse_chain_id(s: &str) -> Result<char, ParseError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && !c.is_ascii_control() => Ok(c),
        _ => Err(ParseError(format!(
            "'{}' is not a single-character chain identifier",
            s
        ))),
    }
}

/// Parses a `FROM=TO` chain substitution.
pub fn parse_chain_mapping(s: &str) -> Result<(char, char), ParseError> {
    let (from, to) = s
        .split_once('=')
        .ok_or_else(|| ParseError(format!("expected FROM=TO, got '{}'", s)))?;
    Ok((parse_chain_id(from.trim())?, parse_chain_id(to.trim())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_id_accepts_single_ascii_characters() {
        assert_eq!(parse_chain_id("A"), Ok('A'));
        assert_eq!(parse_chain_id("7"), Ok('7'));
        assert!(parse_chain_id("").is_err());
        assert!(parse_chain_id("AB").is_err());
        assert!(parse_chain_id("α").is_err());
    }

    #[test]
    fn mapping_requires_separator_and_two_ids() {
        assert_eq!(parse_chain_mapping("C=A"), Ok(('C', 'A')));
        assert_eq!(parse_chain_mapping(" D = B "), Ok(('D', 'B')));
        assert!(parse_chain_mapping("CA").is_err());
        assert!(parse_chain_mapping("C=").is_err());
        assert!(parse_chain_mapping("CC=A").is_err());
    }
}
