//! Text renderings of a flattened pair sequence.
//!
//! - [`OutputFormat::Lines`]: `path<TAB>value` per line
//! - [`OutputFormat::Json`]: a JSON array of `[path, value]` arrays
//! - [`OutputFormat::List`]: a flat alternating Tcl list, `path value path value ...`

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::flatten::{alternating, FlatPair};

/// Output format for a pair sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `path<TAB>value` line per pair.
    #[default]
    Lines,
    /// JSON array of two-element arrays.
    Json,
    /// Alternating Tcl list.
    List,
}

impl OutputFormat {
    /// Format name as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Lines => "lines",
            OutputFormat::Json => "json",
            OutputFormat::List => "list",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lines" => Ok(OutputFormat::Lines),
            "json" => Ok(OutputFormat::Json),
            "list" => Ok(OutputFormat::List),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Render `pairs` in the given format. The result ends with a newline unless
/// it is an empty `Lines` rendering.
pub fn render(pairs: &[FlatPair], format: OutputFormat) -> String {
    match format {
        OutputFormat::Lines => render_lines(pairs),
        OutputFormat::Json => render_json(pairs),
        OutputFormat::List => render_list(pairs),
    }
}

fn render_lines(pairs: &[FlatPair]) -> String {
    let mut output = String::new();
    for pair in pairs {
        output.push_str(&pair.path);
        output.push('\t');
        output.push_str(&pair.value);
        output.push('\n');
    }
    output
}

fn render_json(pairs: &[FlatPair]) -> String {
    let array = Value::Array(
        pairs
            .iter()
            .map(|pair| {
                Value::Array(vec![
                    Value::String(pair.path.clone()),
                    Value::String(pair.value.clone()),
                ])
            })
            .collect(),
    );
    let mut output = array.to_string();
    output.push('\n');
    output
}

fn render_list(pairs: &[FlatPair]) -> String {
    let mut output = String::new();
    for element in alternating(pairs) {
        if !output.is_empty() {
            output.push(' ');
        }
        quote_list_element(element, &mut output);
    }
    output.push('\n');
    output
}

/// Characters that force quoting of a Tcl list element.
fn is_list_special(ch: char) -> bool {
    matches!(
        ch,
        '{' | '}' | '[' | ']' | '$' | ';' | '"' | '\\' | ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C'
    )
}

/// Braces can quote `s` if its unescaped braces nest properly and no
/// backslash ends the element or precedes a newline. A backslash hides the
/// character after it from the brace count, as in Tcl's list parser.
fn can_brace_quote(s: &str) -> bool {
    let mut depth: i64 = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                None | Some('\n') => return false,
                Some(_) => {}
            },
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Append one list element, quoted so a Tcl list parser reads it back unchanged.
fn quote_list_element(element: &str, output: &mut String) {
    if element.is_empty() {
        output.push_str("{}");
        return;
    }

    let needs_quoting = element.starts_with('#') || element.chars().any(is_list_special);
    if !needs_quoting {
        output.push_str(element);
        return;
    }

    if can_brace_quote(element) {
        output.push('{');
        output.push_str(element);
        output.push('}');
        return;
    }

    for ch in element.chars() {
        match ch {
            '\n' => output.push_str("\\n"),
            '\t' => output.push_str("\\t"),
            '\r' => output.push_str("\\r"),
            '\x0B' => output.push_str("\\v"),
            '\x0C' => output.push_str("\\f"),
            c if is_list_special(c) || c == '#' => {
                output.push('\\');
                output.push(c);
            }
            c => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<FlatPair> {
        vec![FlatPair::new("a", "1"), FlatPair::new("b,c", "two words")]
    }

    #[test]
    fn test_format_names_round_trip() {
        for format in [OutputFormat::Lines, OutputFormat::Json, OutputFormat::List] {
            assert_eq!(format.name().parse::<OutputFormat>(), Ok(format));
        }
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_lines() {
        assert_eq!(
            render(&sample(), OutputFormat::Lines),
            "a\t1\nb,c\ttwo words\n"
        );
        assert_eq!(render(&[], OutputFormat::Lines), "");
    }

    #[test]
    fn test_json() {
        assert_eq!(
            render(&sample(), OutputFormat::Json),
            "[[\"a\",\"1\"],[\"b,c\",\"two words\"]]\n"
        );
        assert_eq!(render(&[], OutputFormat::Json), "[]\n");
    }

    #[test]
    fn test_list() {
        assert_eq!(
            render(&sample(), OutputFormat::List),
            "a 1 b,c {two words}\n"
        );
        assert_eq!(render(&[], OutputFormat::List), "\n");
    }

    #[test]
    fn test_list_quoting() {
        let quote = |s: &str| {
            let mut out = String::new();
            quote_list_element(s, &mut out);
            out
        };
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote(""), "{}");
        assert_eq!(quote("#tag"), "{#tag}");
        assert_eq!(quote("[1,2]"), "{[1,2]}");
        assert_eq!(quote("{\"a\":1}"), "{{\"a\":1}}");
        assert_eq!(quote("a{b"), "a\\{b");
        assert_eq!(quote("ends\\"), "ends\\\\");
        assert_eq!(quote("x}\ny"), "x\\}\\ny");
        assert_eq!(quote(r"a\b"), r"{a\b}");
        assert_eq!(quote(r"\{}"), r"\\\{\}");
        assert_eq!(quote(r"{\}"), r"\{\\\}");
        assert_eq!(quote("a\\\nb"), r"a\\\nb");
    }

    fn is_list_space(ch: char) -> bool {
        matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
    }

    /// Split a Tcl list the way Tcl's list parser does, for the brace-quoted
    /// and backslash-escaped forms. Double-quoted elements are rejected.
    fn split_list(list: &str) -> Result<Vec<String>, String> {
        let chars: Vec<char> = list.chars().collect();
        let mut elements = Vec::new();
        let mut i = 0;
        loop {
            while i < chars.len() && is_list_space(chars[i]) {
                i += 1;
            }
            if i == chars.len() {
                return Ok(elements);
            }

            let mut element = String::new();
            match chars[i] {
                '"' => return Err(format!("quoted element at {}", i)),
                '{' => {
                    let mut depth = 1;
                    i += 1;
                    loop {
                        let ch = *chars.get(i).ok_or("unmatched open brace")?;
                        i += 1;
                        match ch {
                            '\\' => {
                                let next = *chars.get(i).ok_or("backslash at end of list")?;
                                i += 1;
                                element.push(ch);
                                element.push(next);
                                continue;
                            }
                            '{' => depth += 1,
                            '}' => {
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                            }
                            _ => {}
                        }
                        element.push(ch);
                    }
                    if i < chars.len() && !is_list_space(chars[i]) {
                        return Err(format!("list element in braces followed by {:?}", chars[i]));
                    }
                }
                _ => {
                    while i < chars.len() && !is_list_space(chars[i]) {
                        let ch = chars[i];
                        i += 1;
                        if ch != '\\' {
                            element.push(ch);
                            continue;
                        }
                        let next = *chars.get(i).ok_or("backslash at end of list")?;
                        i += 1;
                        element.push(match next {
                            'n' => '\n',
                            't' => '\t',
                            'r' => '\r',
                            'v' => '\x0B',
                            'f' => '\x0C',
                            c => c,
                        });
                    }
                }
            }
            elements.push(element);
        }
    }

    #[test]
    fn test_list_reads_back_unchanged() {
        let awkward = [
            "",
            "plain",
            "two words",
            "#hash",
            "a#b",
            "[1,{\"a\":null}]",
            r"\{}",
            r"{\}",
            r"\",
            r"a\b",
            r"{a\}b}",
            "}{",
            "{{}",
            "{}}",
            "\"quoted\"",
            "$var;cmd",
            "tab\there",
            "line\nbreak",
            "back\\\nslash newline",
            "cr\r vt\x0B ff\x0C",
            "clé 名前",
        ];
        let flat: Vec<FlatPair> = awkward
            .iter()
            .enumerate()
            .map(|(i, value)| FlatPair::new(format!("k{}", i), *value))
            .collect();

        let list = render(&flat, OutputFormat::List);
        let expected: Vec<&str> = alternating(&flat).collect();
        assert_eq!(split_list(&list), Ok(expected.iter().map(|s| s.to_string()).collect()));
    }

    #[test]
    fn test_list_backslash_values_from_document() {
        let flat = crate::flatten(r#"{"a": "\\{}", "b": "{\\}"}"#).unwrap();
        let list = render(&flat, OutputFormat::List);
        assert_eq!(list, "a \\\\\\{\\} b \\{\\\\\\}\n");
        assert_eq!(
            split_list(&list).unwrap(),
            vec!["a", r"\{}", "b", r"{\}"]
        );
    }
}
