//! Flattening slot subtrees into renderable text lines.
//!
//! A terminal pane shows the textual content of its markup: block elements
//! break lines, inline elements flow, and script/style elements render
//! nothing (they are payload for the host, not content).

use trifold_engine::dom::{is_executable, Node};

/// Tags that force a line break before and after their content.
const BLOCK_TAGS: [&str; 22] = [
    "article", "aside", "blockquote", "div", "dl", "dd", "dt", "footer", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "li", "nav", "ol", "p", "section", "tr", "ul",
];

fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// Flatten a slot subtree into logical lines of text.
#[must_use]
pub fn slot_lines(nodes: &[Node]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    walk(nodes, &mut lines, &mut current);
    flush(&mut lines, &mut current);
    lines
}

/// Wrap logical lines to a column width.
#[must_use]
pub fn wrap_lines(lines: &[String], width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut wrapped = Vec::new();
    for line in lines {
        if line.is_empty() {
            wrapped.push(String::new());
        } else {
            wrapped.extend(textwrap::wrap(line, width).into_iter().map(String::from));
        }
    }
    wrapped
}

fn walk(nodes: &[Node], lines: &mut Vec<String>, current: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => push_collapsed(current, text),
            Node::Element(el) => {
                if is_executable(&el.tag) {
                    continue;
                }
                if el.tag == "br" || el.tag == "hr" {
                    flush(lines, current);
                } else if is_block(&el.tag) {
                    flush(lines, current);
                    walk(&el.children, lines, current);
                    flush(lines, current);
                } else {
                    walk(&el.children, lines, current);
                }
            }
        }
    }
}

fn push_collapsed(current: &mut String, text: &str) {
    let mut pending_space = text.starts_with(char::is_whitespace) && !current.is_empty();
    for word in text.split_whitespace() {
        if pending_space && !current.ends_with(' ') {
            current.push(' ');
        }
        current.push_str(word);
        pending_space = true;
    }
    // A trailing space survives so adjacent inline text keeps its gap.
    if text.ends_with(char::is_whitespace) && !current.is_empty() && !current.ends_with(' ') {
        current.push(' ');
    }
}

fn flush(lines: &mut Vec<String>, current: &mut String) {
    let line = current.trim_end();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use trifold_engine::parse_fragment;

    fn lines_of(markup: &str) -> Vec<String> {
        slot_lines(&parse_fragment(markup))
    }

    #[test]
    fn test_paragraphs_become_lines() {
        assert_eq!(lines_of("<p>one</p><p>two</p>"), vec!["one", "two"]);
    }

    #[test]
    fn test_inline_elements_flow() {
        assert_eq!(lines_of("<p>a <b>bold</b> word</p>"), vec!["a bold word"]);
    }

    #[test]
    fn test_adjacent_inline_text_has_no_invented_gap() {
        assert_eq!(lines_of("<p>re<b>materialize</b></p>"), vec!["rematerialize"]);
    }

    #[test]
    fn test_br_breaks_line() {
        assert_eq!(lines_of("one<br>two"), vec!["one", "two"]);
    }

    #[test]
    fn test_scripts_and_styles_render_nothing() {
        assert_eq!(
            lines_of("<p>shown</p><script>x=1</script><style>p{}</style>"),
            vec!["shown"]
        );
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(lines_of("<p>a\n   b\t c</p>"), vec!["a b c"]);
    }

    #[test]
    fn test_list_items_each_get_a_line() {
        assert_eq!(lines_of("<ul><li>x</li><li>y</li></ul>"), vec!["x", "y"]);
    }

    #[test]
    fn test_wrap_lines_to_width() {
        let lines = vec!["aaa bbb ccc".to_string()];
        assert_eq!(wrap_lines(&lines, 7), vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_wrap_preserves_empty_lines() {
        let lines = vec![String::new(), "x".to_string()];
        assert_eq!(wrap_lines(&lines, 10), vec!["", "x"]);
    }
}
