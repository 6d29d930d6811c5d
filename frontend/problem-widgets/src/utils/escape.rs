/// Entity table for program output shown after a stdin run.
///
/// Only punctuation that could be read as markup or script is replaced; letters,
/// digits, whitespace and non-ASCII text are left as they are.
fn output_entity(c: char) -> Option<&'static str> {
    let entity = match c {
        '&' => "&amp;",
        '<' => "&lt;",
        '>' => "&gt;",
        '"' => "&quot;",
        '\'' => "&#39;",
        '/' => "&#x2F;",
        '\\' => "&#x5C;",
        '`' => "&#x60;",
        '(' => "&#40;",
        ')' => "&#41;",
        '+' => "&#43;",
        '-' => "&#45;",
        ';' => "&#59;",
        '=' => "&#x3D;",
        '[' => "&#91;",
        ']' => "&#93;",
        '^' => "&#94;",
        '{' => "&#123;",
        '|' => "&#124;",
        '}' => "&#125;",
        '~' => "&#126;",
        _ => return None,
    };
    Some(entity)
}

/// Escape grading output before it is inserted into the page.
pub fn escape_output(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match output_entity(c) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(c),
        }
    }
    escaped
}

/// Escape text content for the element tree.
pub fn escape_text(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape an attribute value (always emitted double-quoted).
pub fn escape_attribute(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}
