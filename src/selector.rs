//! Minimal CSS selector support for discovering counter elements.
//!
//! Grammar: a comma-separated list of compound selectors, each an optional
//! tag name (or `*`) followed by `.class` and `[attribute]` parts, e.g.
//! `.b-stat-card__value[data-target], span.stat[data-target]`. Combinators,
//! pseudo-classes and attribute value tests are rejected.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::CountUpError;

/// One compound selector: every part must match the same element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    tag: Option<String>,
    classes: Vec<String>,
    attributes: Vec<String>,
}

/// A parsed selector list; an element matches if any alternative does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<CompoundSelector>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(input: &str) -> Result<Self, CountUpError> {
        let alternatives = input
            .split(',')
            .map(|part| parse_compound(part.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { alternatives })
    }

    /// Whether an element with `tag` matches, probing classes and
    /// attributes through the given closures.
    pub fn matches<C, A>(&self, tag: &str, has_class: C, has_attribute: A) -> bool
    where
        C: Fn(&str) -> bool,
        A: Fn(&str) -> bool,
    {
        self.alternatives.iter().any(|compound| {
            compound
                .tag
                .as_deref()
                .is_none_or(|want| want.eq_ignore_ascii_case(tag))
                && compound.classes.iter().all(|c| has_class(c.as_str()))
                && compound.attributes.iter().all(|a| has_attribute(a.as_str()))
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        let _ = chars.next();
    }
    ident
}

fn skip_spaces(chars: &mut Peekable<CharIndices<'_>>) {
    while chars.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
        let _ = chars.next();
    }
}

fn parse_compound(input: &str) -> Result<CompoundSelector, CountUpError> {
    if input.is_empty() {
        return Err(CountUpError::Selector("empty selector".to_owned()));
    }

    let mut compound = CompoundSelector::default();
    let mut chars = input.char_indices().peekable();

    match chars.peek() {
        Some(&(_, '*')) => {
            let _ = chars.next();
        }
        Some(&(_, c)) if is_ident_char(c) => {
            compound.tag = Some(take_ident(&mut chars));
        }
        _ => {}
    }

    while let Some((offset, c)) = chars.next() {
        match c {
            '.' => {
                let class = take_ident(&mut chars);
                if class.is_empty() {
                    return Err(CountUpError::Selector(format!(
                        "missing class name after '.' at offset {offset} in '{input}'"
                    )));
                }
                compound.classes.push(class);
            }
            '[' => {
                skip_spaces(&mut chars);
                let attribute = take_ident(&mut chars);
                skip_spaces(&mut chars);
                if attribute.is_empty() || chars.next().map(|(_, c)| c) != Some(']') {
                    return Err(CountUpError::Selector(format!(
                        "expected '[name]' at offset {offset} in '{input}'"
                    )));
                }
                compound.attributes.push(attribute);
            }
            c if c.is_whitespace() => {
                return Err(CountUpError::Selector(format!(
                    "combinators are not supported ('{input}')"
                )));
            }
            other => {
                return Err(CountUpError::Selector(format!(
                    "unexpected '{other}' at offset {offset} in '{input}'"
                )));
            }
        }
    }

    Ok(compound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(selector: &str, tag: &str, classes: &[&str], attrs: &[&str]) -> bool {
        Selector::parse(selector)
            .unwrap()
            .matches(tag, |c| classes.contains(&c), |a| attrs.contains(&a))
    }

    #[test]
    fn parses_class_and_attribute() {
        let selector = Selector::parse(".b-stat-card__value[data-target]").unwrap();
        assert_eq!(
            selector.alternatives,
            vec![CompoundSelector {
                tag: None,
                classes: vec!["b-stat-card__value".to_owned()],
                attributes: vec!["data-target".to_owned()],
            }]
        );
    }

    #[test]
    fn requires_every_part() {
        let sel = ".b-stat-card__value[data-target]";
        assert!(matches(sel, "span", &["b-stat-card__value"], &["data-target"]));
        assert!(!matches(sel, "span", &["b-stat-card__value"], &[]));
        assert!(!matches(sel, "span", &[], &["data-target"]));
    }

    #[test]
    fn tag_names_compare_case_insensitively() {
        assert!(matches("SPAN.stat", "span", &["stat"], &[]));
        assert!(!matches("div.stat", "span", &["stat"], &[]));
        assert!(matches("*[data-target]", "p", &[], &["data-target"]));
    }

    #[test]
    fn any_alternative_matches() {
        let sel = ".a[data-target], .b";
        assert!(matches(sel, "div", &["b"], &[]));
        assert!(matches(sel, "div", &["a"], &["data-target"]));
        assert!(!matches(sel, "div", &["a"], &[]));
    }

    #[test]
    fn tolerates_spaces_inside_brackets() {
        assert!(matches("[ data-target ]", "span", &[], &["data-target"]));
    }

    #[test]
    fn rejects_unsupported_syntax() {
        for bad in [
            "",
            ".a, ",
            ".",
            "div > .a",
            ".a .b",
            "[data-target=\"1\"]",
            "[data-target",
            ".a:hover",
            "#id",
        ] {
            assert!(
                matches!(Selector::parse(bad), Err(CountUpError::Selector(_))),
                "accepted {bad:?}"
            );
        }
    }
}
