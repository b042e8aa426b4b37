//! Locates the closing token for a grouped subexpression.

/// Given `from` pointing at an opening token, scans `from+1..=to` and returns
/// the index of the matching closer, or `None`.
///
/// Quotes match their first unnested counterpart. Parentheses and brackets
/// nest against each other and are only counted while both quote kinds are
/// closed. A `/` is closed by the next `/` at bracket depth zero; this is how
/// a path like `/a/b[c/d]/e` splits into successive steps.
pub(crate) fn find_closing(tokens: &[String], from: usize, to: usize) -> Option<usize> {
    if from >= to || to >= tokens.len() {
        return None;
    }
    let opener = tokens[from].as_str();
    match opener {
        "\"" | "'" => (from + 1..=to).find(|&i| tokens[i] == opener),
        "(" | "[" | "/" => {
            let mut quote_closed = true;
            let mut apos_closed = true;
            let mut parens = i32::from(opener == "(");
            let mut brackets = i32::from(opener == "[");
            let mut slashes = i32::from(opener == "/");
            for i in from + 1..=to {
                match tokens[i].as_str() {
                    "\"" => quote_closed = !quote_closed,
                    "'" => apos_closed = !apos_closed,
                    t if quote_closed && apos_closed => match t {
                        "(" => parens += 1,
                        ")" => parens -= 1,
                        "[" => brackets += 1,
                        "]" => brackets -= 1,
                        "/" if parens == 0 && brackets == 0 => slashes -= 1,
                        _ => {}
                    },
                    _ => {}
                }
                let closed = match opener {
                    "(" => parens == 0,
                    "[" => brackets == 0,
                    _ => slashes == 0,
                };
                if closed {
                    return Some(i);
                }
            }
            None
        }
        _ => None,
    }
}
