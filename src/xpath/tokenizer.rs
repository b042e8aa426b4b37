//! Splits an XPath expression into its flat token array.
//!
//! The nine delimiter characters `/ ( ) [ ] " ' = < >` become single-character
//! tokens; every maximal run of other characters becomes one token with its
//! internal whitespace preserved. Tokens are classified at use time, not here.

use nom::{
    IResult, Parser, branch::alt, bytes::complete::take_while1, character::complete::one_of,
    combinator::recognize, multi::many0,
};

const DELIMITERS: &str = "/()[]\"'=<>";

fn delimiter(input: &str) -> IResult<&str, &str> {
    recognize(one_of(DELIMITERS)).parse(input)
}

fn fragment(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !DELIMITERS.contains(c)).parse(input)
}

/// Tokenizes an expression. Total: every input splits into tokens, so this
/// cannot fail and never produces an empty token.
pub(crate) fn tokenize(expression: &str) -> Vec<String> {
    let parsed: IResult<&str, Vec<&str>> = many0(alt((delimiter, fragment))).parse(expression);
    match parsed {
        Ok((_, tokens)) => tokens.into_iter().map(str::to_string).collect(),
        // every character is either a delimiter or part of a fragment
        Err(_) => Vec::new(),
    }
}

/// An optionally signed run of decimal digits, after trimming.
pub(crate) fn is_integer(token: &str) -> bool {
    let t = token.trim();
    let t = t.strip_prefix(['+', '-']).unwrap_or(t);
    !t.is_empty() && t.chars().all(|c| c.is_ascii_digit())
}

/// An optionally signed decimal number with at most one point and at least
/// one digit, after trimming. No exponent form.
pub(crate) fn is_double(token: &str) -> bool {
    let t = token.trim();
    let t = t.strip_prefix(['+', '-']).unwrap_or(t);
    let mut digits = 0usize;
    let mut points = 0usize;
    for c in t.chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if c == '.' {
            points += 1;
            if points > 1 {
                return false;
            }
        } else {
            return false;
        }
    }
    digits > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(expr: &str) -> Vec<String> {
        tokenize(expr)
    }

    #[test]
    fn splits_on_delimiters_keeping_them() {
        assert_eq!(tokens("//div"), vec!["/", "/", "div"]);
        assert_eq!(
            tokens("/body/*[1]/@type"),
            vec!["/", "body", "/", "*", "[", "1", "]", "/", "@type"]
        );
        assert_eq!(
            tokens("a[@id='x']"),
            vec!["a", "[", "@id", "=", "'", "x", "'", "]"]
        );
    }

    #[test]
    fn preserves_whitespace_inside_fragments() {
        assert_eq!(tokens("a[ 1 ]"), vec!["a", "[", " 1 ", "]"]);
        assert_eq!(tokens("'hello world'"), vec!["'", "hello world", "'"]);
    }

    #[test]
    fn empty_expression_yields_no_tokens() {
        assert!(tokens("").is_empty());
    }

    #[test]
    fn combined_operators_split_into_single_characters() {
        assert_eq!(tokens("a<=b"), vec!["a", "<", "=", "b"]);
    }

    #[test]
    fn integer_classification() {
        assert!(is_integer("5"));
        assert!(is_integer(" 42 "));
        assert!(is_integer("-3"));
        assert!(is_integer("+7"));
        assert!(!is_integer("1.5"));
        assert!(!is_integer("abc"));
        assert!(!is_integer(""));
        assert!(!is_integer("-"));
    }

    #[test]
    fn double_classification() {
        assert!(is_double("1.5"));
        assert!(is_double(" -0.25 "));
        assert!(is_double("42"));
        assert!(is_double(".5"));
        assert!(!is_double("1.2.3"));
        assert!(!is_double("1e5"));
        assert!(!is_double("."));
        assert!(!is_double(""));
    }
}
