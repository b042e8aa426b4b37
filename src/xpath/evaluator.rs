//! The recursive dispatcher at the heart of the engine.
//!
//! One [`XPathExpression`] owns the token array for one evaluation. Parsing
//! and evaluation are deliberately interleaved: `eval_range` consumes a token
//! range against a rolling value-list, recursing with advanced cursors. The
//! grammar lives in the interplay of the `from`/`to` cursors, the recursive
//! flag set by `//`, and the filter context threaded through call arguments.
//! Keep it that way; an AST-first rewrite changes the observable semantics of
//! per-source function re-evaluation and of the recursive name step.

use super::error::XPathError;
use super::functions::evaluate_function;
use super::matcher::find_closing;
use super::operators::ComparisonOp;
use super::tokenizer::{is_double, is_integer, tokenize};
use super::value::XPathValue;
use crate::dom::DomElement;
use std::collections::HashSet;

/// A tokenized XPath expression, ready to evaluate against a root element.
pub struct XPathExpression {
    tokens: Vec<String>,
}

impl XPathExpression {
    /// Tokenizes `expression`. Tokenization is total; syntax problems only
    /// surface during evaluation.
    pub fn new(expression: &str) -> Self {
        XPathExpression {
            tokens: tokenize(expression),
        }
    }

    /// Evaluates the whole expression against `root`, producing the ordered
    /// result list.
    pub fn evaluate<'a, N: DomElement<'a>>(
        &self,
        root: N,
    ) -> Result<Vec<XPathValue<N>>, XPathError> {
        let values = vec![XPathValue::Element(root)];
        let Some(to) = self.tokens.len().checked_sub(1) else {
            return Ok(values);
        };
        self.eval_range(values, 0, to, false, 1, 0, false, None)
    }

    pub(super) fn token(&self, index: usize) -> &str {
        &self.tokens[index]
    }

    /// Evaluates `tokens[from..=to]` against `values`.
    ///
    /// `position` and `last` are the 1-based position and size of the filter
    /// subject while `in_filter` holds; `filter_source` is the subject list of
    /// the enclosing predicate, used as the left context of a comparison's
    /// right-hand side.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn eval_range<'a, N: DomElement<'a>>(
        &self,
        values: Vec<XPathValue<N>>,
        from: usize,
        to: usize,
        is_recursive: bool,
        position: usize,
        last: usize,
        in_filter: bool,
        filter_source: Option<&[XPathValue<N>]>,
    ) -> Result<Vec<XPathValue<N>>, XPathError> {
        if from > to || to >= self.tokens.len() {
            return Ok(values);
        }
        let token = self.tokens[from].as_str();

        if token.trim().is_empty() {
            return self.eval_range(
                values,
                from + 1,
                to,
                is_recursive,
                position,
                last,
                in_filter,
                filter_source,
            );
        }

        match token {
            "(" => {
                let close = find_closing(&self.tokens, from, to)
                    .ok_or_else(|| XPathError::new("unclosed parenthesis"))?;
                let inner = self.eval_range(
                    values,
                    from + 1,
                    close - 1,
                    false,
                    position,
                    last,
                    in_filter,
                    filter_source,
                )?;
                self.eval_range(
                    inner,
                    close + 1,
                    to,
                    false,
                    position,
                    last,
                    in_filter,
                    filter_source,
                )
            }
            "[" => {
                let close = find_closing(&self.tokens, from, to)
                    .ok_or_else(|| XPathError::new("unclosed bracket"))?;
                let filtered = self.filter(values, from + 1, close - 1)?;
                self.eval_range(
                    filtered,
                    close + 1,
                    to,
                    false,
                    position,
                    last,
                    in_filter,
                    filter_source,
                )
            }
            "\"" | "'" => {
                let close = find_closing(&self.tokens, from, to)
                    .ok_or_else(|| XPathError::new("missing closing quote"))?;
                let literal = self.tokens[from + 1..close].concat();
                self.eval_range(
                    vec![XPathValue::String(literal)],
                    close + 1,
                    to,
                    false,
                    position,
                    last,
                    in_filter,
                    filter_source,
                )
            }
            "=" | "<" | ">" if in_filter => {
                let combined = token != "=" && from < to && self.tokens[from + 1] == "=";
                let op = match (token, combined) {
                    ("=", _) => ComparisonOp::Equals,
                    ("<", false) => ComparisonOp::LessThan,
                    ("<", true) => ComparisonOp::LessThanOrEqual,
                    (">", false) => ComparisonOp::GreaterThan,
                    _ => ComparisonOp::GreaterThanOrEqual,
                };
                let rhs_from = if combined { from + 2 } else { from + 1 };
                let subject = filter_source.map(|s| s.to_vec()).unwrap_or_default();
                let right = self.eval_range(
                    subject,
                    rhs_from,
                    to,
                    false,
                    position,
                    last,
                    in_filter,
                    filter_source,
                )?;
                Ok(vec![XPathValue::Boolean(op.apply(&values, &right))])
            }
            "/" => {
                let mut from = from;
                let go_recursive = from < to && self.tokens[from + 1] == "/";
                if go_recursive {
                    from += 1;
                }
                if from >= to {
                    return Err(XPathError::new("path step missing after '/'"));
                }
                let step_end = match find_closing(&self.tokens, from, to) {
                    Some(close) if close > from + 1 => close - 1,
                    _ => to,
                };
                let stepped = self.eval_range(
                    values,
                    from + 1,
                    step_end,
                    go_recursive,
                    position,
                    last,
                    in_filter,
                    filter_source,
                )?;
                self.eval_range(
                    stepped,
                    step_end + 1,
                    to,
                    false,
                    position,
                    last,
                    in_filter,
                    filter_source,
                )
            }
            _ if self.is_function_call(from, to) => {
                let close = find_closing(&self.tokens, from + 1, to)
                    .ok_or_else(|| XPathError::new("unclosed function call"))?;
                let result = evaluate_function(self, &values, from, close, position, last, in_filter)?;
                self.eval_range(
                    result,
                    close + 1,
                    to,
                    false,
                    position,
                    last,
                    in_filter,
                    filter_source,
                )
            }
            _ if is_integer(token) || is_double(token) => {
                let number: f64 = token
                    .trim()
                    .parse()
                    .map_err(|_| XPathError::new(format!("invalid number literal '{token}'")))?;
                self.eval_range(
                    vec![XPathValue::Number(number)],
                    from + 1,
                    to,
                    false,
                    position,
                    last,
                    in_filter,
                    filter_source,
                )
            }
            _ => self.name_step(
                &values,
                from,
                to,
                is_recursive,
                position,
                last,
                in_filter,
                filter_source,
            ),
        }
    }

    /// Any non-empty trimmed token immediately followed by `(` is treated as
    /// a function call; unknown names are rejected at dispatch.
    fn is_function_call(&self, from: usize, to: usize) -> bool {
        from < to && self.tokens[from + 1] == "(" && !self.tokens[from].trim().is_empty()
    }

    /// Keeps each value whose predicate holds. A boolean result keeps on
    /// `true`, a number keeps when it equals the 1-based position, any other
    /// non-empty result is truthy, and an empty result drops the value.
    fn filter<'a, N: DomElement<'a>>(
        &self,
        values: Vec<XPathValue<N>>,
        from: usize,
        to: usize,
    ) -> Result<Vec<XPathValue<N>>, XPathError> {
        let mut kept = Vec::new();
        let total = values.len();
        for (index, value) in values.iter().enumerate() {
            let subject = vec![value.clone()];
            let result = self.eval_range(
                subject.clone(),
                from,
                to,
                false,
                index + 1,
                total,
                true,
                Some(&subject),
            )?;
            let keep = match result.first() {
                None => false,
                Some(XPathValue::Boolean(b)) => *b,
                Some(XPathValue::Number(n)) => *n == (index + 1) as f64,
                Some(_) => true,
            };
            if keep {
                kept.push(value.clone());
            }
        }
        Ok(kept)
    }

    /// A name axis step: `.`, `..`, `*`, `@name`, `@*`, or an element name.
    #[allow(clippy::too_many_arguments)]
    fn name_step<'a, N: DomElement<'a>>(
        &self,
        values: &[XPathValue<N>],
        from: usize,
        to: usize,
        is_recursive: bool,
        position: usize,
        last: usize,
        in_filter: bool,
        filter_source: Option<&[XPathValue<N>]>,
    ) -> Result<Vec<XPathValue<N>>, XPathError> {
        if self.tokens[from].trim().starts_with('@') {
            self.attribute_step(
                values,
                from,
                to,
                is_recursive,
                position,
                last,
                in_filter,
                filter_source,
            )
        } else {
            let mut seen = HashSet::new();
            let mut accumulator = Vec::new();
            self.element_step(
                values,
                from,
                to,
                is_recursive,
                in_filter,
                filter_source,
                &mut seen,
                &mut accumulator,
            )?;
            Ok(accumulator)
        }
    }

    /// The attribute axis. Results are always strings, never elements.
    #[allow(clippy::too_many_arguments)]
    fn attribute_step<'a, N: DomElement<'a>>(
        &self,
        values: &[XPathValue<N>],
        from: usize,
        to: usize,
        is_recursive: bool,
        position: usize,
        last: usize,
        in_filter: bool,
        filter_source: Option<&[XPathValue<N>]>,
    ) -> Result<Vec<XPathValue<N>>, XPathError> {
        let name = self.tokens[from].trim();
        let attribute = &name[1..];

        let mut pool = Vec::new();
        let mut seen = HashSet::new();
        for value in values {
            let Some(element) = value.as_element() else {
                return Err(XPathError::new(
                    "attribute axis applied to a non-element value",
                ));
            };
            if is_recursive {
                for descendant in element.descendant_elements() {
                    if seen.insert(descendant) {
                        pool.push(descendant);
                    }
                }
            } else {
                pool.push(*element);
            }
        }

        let mut accumulator = Vec::new();
        for element in pool {
            if attribute == "*" {
                for (_, attr_value) in element.attributes() {
                    accumulator.extend(self.eval_range(
                        vec![XPathValue::String(attr_value.to_string())],
                        from + 1,
                        to,
                        false,
                        position,
                        last,
                        in_filter,
                        filter_source,
                    )?);
                }
            } else if let Some(attr_value) = element.attribute(attribute) {
                accumulator.extend(self.eval_range(
                    vec![XPathValue::String(attr_value.to_string())],
                    from + 1,
                    to,
                    false,
                    position,
                    last,
                    in_filter,
                    filter_source,
                )?);
            }
        }
        Ok(accumulator)
    }

    /// The element axis, shared by the plain and the `//`-recursive forms.
    ///
    /// The accumulator is set-backed and insertion-ordered. In the recursive
    /// form a plainly named element only enters the accumulator through the
    /// child-membership check, which makes a recursive path inside a
    /// predicate leak its matches into the predicate result instead of
    /// behaving as a document-wide existence test. That quirk is intentional
    /// and covered by the nested-div tests.
    #[allow(clippy::too_many_arguments)]
    fn element_step<'a, N: DomElement<'a>>(
        &self,
        values: &[XPathValue<N>],
        from: usize,
        to: usize,
        is_recursive: bool,
        in_filter: bool,
        filter_source: Option<&[XPathValue<N>]>,
        seen: &mut HashSet<N>,
        accumulator: &mut Vec<XPathValue<N>>,
    ) -> Result<(), XPathError> {
        let name = self.tokens[from].trim();
        let wildcard_step = matches!(name, "." | ".." | "*");

        let mut source = Vec::new();
        let mut source_seen = HashSet::new();
        for value in values {
            if let Some(element) = value.as_element() {
                if source_seen.insert(*element) {
                    source.push(*element);
                }
            }
        }

        for (index, &element) in source.iter().enumerate() {
            let subnodes: Vec<N> = match name {
                "." => vec![element],
                ".." => element.parent().into_iter().collect(),
                "*" => element.child_elements().collect(),
                _ => element.child_elements_named(name).collect(),
            };
            let subnode_count = subnodes.len();
            let refined = self.eval_range(
                subnodes.into_iter().map(XPathValue::Element).collect(),
                from + 1,
                to,
                false,
                index + 1,
                subnode_count,
                in_filter,
                filter_source,
            )?;

            if is_recursive {
                if wildcard_step {
                    for value in &refined {
                        push_unique(value, seen, accumulator);
                    }
                }
                let refined_elements: HashSet<N> =
                    refined.iter().filter_map(|v| v.as_element().copied()).collect();
                for child in element.child_elements() {
                    self.element_step(
                        &[XPathValue::Element(child)],
                        from,
                        to,
                        true,
                        in_filter,
                        filter_source,
                        seen,
                        accumulator,
                    )?;
                    if !wildcard_step && refined_elements.contains(&child) {
                        push_unique(&XPathValue::Element(child), seen, accumulator);
                    }
                }
            } else {
                for value in &refined {
                    push_unique(value, seen, accumulator);
                }
            }
        }
        Ok(())
    }
}

/// Adds a value to the accumulator, suppressing element duplicates while
/// preserving first-insertion order.
fn push_unique<'a, N: DomElement<'a>>(
    value: &XPathValue<N>,
    seen: &mut HashSet<N>,
    accumulator: &mut Vec<XPathValue<N>>,
) {
    match value {
        XPathValue::Element(e) => {
            if seen.insert(*e) {
                accumulator.push(value.clone());
            }
        }
        _ => accumulator.push(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    /// <root>
    ///   <section kind="intro"><item>one</item><item>two</item></section>
    ///   <section><item>three</item><note tone="low">aside</note></section>
    /// </root>
    fn sample() -> Document {
        let mut doc = Document::new("root");
        let root = doc.root_id();
        let s1 = doc.append_element(
            root,
            "section",
            vec![("kind".to_string(), "intro".to_string())],
        );
        let i1 = doc.append_element(s1, "item", vec![]);
        doc.append_text(i1, "one");
        let i2 = doc.append_element(s1, "item", vec![]);
        doc.append_text(i2, "two");
        let s2 = doc.append_element(root, "section", vec![]);
        let i3 = doc.append_element(s2, "item", vec![]);
        doc.append_text(i3, "three");
        let note = doc.append_element(s2, "note", vec![("tone".to_string(), "low".to_string())]);
        doc.append_text(note, "aside");
        doc
    }

    fn texts(doc: &Document, expr: &str) -> Vec<String> {
        XPathExpression::new(expr)
            .evaluate(doc.root())
            .unwrap()
            .iter()
            .map(|v| v.to_text())
            .collect()
    }

    #[test]
    fn empty_expression_returns_the_root() {
        let doc = sample();
        let result = XPathExpression::new("").evaluate(doc.root()).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn child_steps_walk_the_tree() {
        let doc = sample();
        assert_eq!(texts(&doc, "/section/item"), vec!["one", "two", "three"]);
    }

    #[test]
    fn recursive_step_finds_all_descendants() {
        let doc = sample();
        assert_eq!(texts(&doc, "//item"), vec!["one", "two", "three"]);
        assert_eq!(texts(&doc, "//section/item"), vec!["one", "two", "three"]);
    }

    #[test]
    fn positional_predicate_selects_by_index() {
        let doc = sample();
        assert_eq!(texts(&doc, "/section/item[1]"), vec!["one", "three"]);
        assert_eq!(texts(&doc, "/section/item[2]"), vec!["two"]);
    }

    #[test]
    fn attribute_predicate_filters_elements() {
        let doc = sample();
        assert_eq!(texts(&doc, "/section[@kind]/item"), vec!["one", "two"]);
        assert_eq!(texts(&doc, "//section[@kind='intro']/item[1]"), vec!["one"]);
        assert_eq!(texts(&doc, "/section[@kind='other']/item"), Vec::<String>::new());
    }

    #[test]
    fn attribute_axis_yields_strings() {
        let doc = sample();
        assert_eq!(texts(&doc, "/section/@kind"), vec!["intro"]);
        assert_eq!(texts(&doc, "//@tone"), vec!["low"]);
        assert_eq!(texts(&doc, "//note/@*"), vec!["low"]);
    }

    #[test]
    fn parent_and_self_steps() {
        let doc = sample();
        assert_eq!(texts(&doc, "/section/item[1]/.."), vec!["onetwo", "threeaside"]);
        assert_eq!(texts(&doc, "."), vec![doc.root().text_content()]);
    }

    #[test]
    fn wildcard_step_selects_all_children() {
        let doc = sample();
        assert_eq!(
            texts(&doc, "/section/*"),
            vec!["one", "two", "three", "aside"]
        );
    }

    #[test]
    fn string_literal_replaces_the_value_list() {
        let doc = sample();
        assert_eq!(texts(&doc, "'hello world'"), vec!["hello world"]);
    }

    #[test]
    fn literal_concatenation_spans_delimiter_tokens() {
        let doc = sample();
        assert_eq!(texts(&doc, "'text/javascript'"), vec!["text/javascript"]);
    }

    #[test]
    fn comparison_inside_predicate() {
        let doc = sample();
        assert_eq!(texts(&doc, "//item[text() = 'two']"), vec!["two"]);
        assert_eq!(texts(&doc, "//item['on' < text()]"), vec!["one", "two", "three"]);
        assert_eq!(texts(&doc, "//item['t' < text()]"), vec!["two", "three"]);
    }

    #[test]
    fn position_and_last_functions() {
        let doc = sample();
        assert_eq!(texts(&doc, "/section/item[position() = 2]"), vec!["two"]);
        assert_eq!(texts(&doc, "/section/item[last()]"), vec!["two", "three"]);
        assert_eq!(texts(&doc, "/section/item[position() = last()]"), vec!["two", "three"]);
    }

    #[test]
    fn whitespace_between_tokens_is_ignored() {
        let doc = sample();
        assert_eq!(texts(&doc, " / section / item [ 1 ] "), texts(&doc, "/section/item[1]"));
        assert_eq!(texts(&doc, " // item "), texts(&doc, "//item"));
    }

    #[test]
    fn grouping_parentheses_evaluate_inner_range() {
        let doc = sample();
        assert_eq!(texts(&doc, "(/section/item)[2]"), vec!["two"]);
    }

    #[test]
    fn unclosed_syntax_errors() {
        let doc = sample();
        assert!(XPathExpression::new("//item[").evaluate(doc.root()).is_err());
        assert!(XPathExpression::new("count(//item").evaluate(doc.root()).is_err());
        assert!(XPathExpression::new("//item['x]").evaluate(doc.root()).is_err());
        assert!(XPathExpression::new("/section/").evaluate(doc.root()).is_err());
    }

    #[test]
    fn unknown_function_errors() {
        let doc = sample();
        assert!(XPathExpression::new("frobnicate(//item)")
            .evaluate(doc.root())
            .is_err());
    }

    #[test]
    fn name_matching_is_case_insensitive() {
        let doc = sample();
        assert_eq!(texts(&doc, "//ITEM"), vec!["one", "two", "three"]);
    }
}
