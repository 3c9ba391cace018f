use super::val::format_number;
use super::{Frame, Val};
use ansi_term::{Colour, Style};
use std::rc::Rc;

const MAX_WIDTH: usize = 72;

/// Something a diagnostic instruction asked to have printed.
#[derive(Debug, Clone, PartialEq)]
pub enum Dump {
    Value(Val),
    Registers(Vec<(Rc<str>, Val)>),
    Stack(Vec<Frame>),
}

enum Node {
    Null,
    Number(f64),
    Boolean(bool),
    String(String),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl From<&serde_json::Value> for Node {
    fn from(value: &serde_json::Value) -> Node {
        use serde_json::Value;
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Boolean(*b),
            Value::Number(n) => n.as_f64().map_or(Node::Null, Node::Number),
            Value::String(s) => Node::String(s.clone()),
            Value::Array(a) => Node::Array(a.iter().map(Node::from).collect()),
            Value::Object(o) => {
                Node::Object(o.iter().map(|(k, v)| (k.clone(), Node::from(v))).collect())
            }
        }
    }
}

impl From<&Val> for Node {
    fn from(val: &Val) -> Node {
        match val {
            Val::Null => Node::Null,
            Val::Number(n) => Node::Number(*n),
            Val::Boolean(b) => Node::Boolean(*b),
            Val::String(s) => Node::String(s.to_string()),
            Val::Structure(v) => Node::from(&**v),
        }
    }
}

impl From<&Frame> for Node {
    fn from(frame: &Frame) -> Node {
        Node::Object(vec![
            ("name".to_string(), Node::String(frame.name().to_string())),
            (
                "callingLine".to_string(),
                Node::Number(frame.calling_line() as f64),
            ),
            (
                "parameters".to_string(),
                Node::Array(
                    frame
                        .parameters()
                        .iter()
                        .map(|p| Node::String(p.clone()))
                        .collect(),
                ),
            ),
        ])
    }
}

impl From<&Dump> for Node {
    fn from(dump: &Dump) -> Node {
        match dump {
            Dump::Value(val) => Node::from(val),
            Dump::Registers(registers) => Node::Object(
                registers
                    .iter()
                    .map(|(name, val)| (name.to_string(), Node::from(val)))
                    .collect(),
            ),
            Dump::Stack(frames) => Node::Array(frames.iter().map(Node::from).collect()),
        }
    }
}

/// Render a dump for humans. Short containers stay on one line; longer ones
/// put each entry on its own line indented by two spaces.
pub fn inspect(dump: &Dump, colors: bool) -> String {
    render(&Node::from(dump), 0, colors)
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn key(s: &str) -> String {
    let plain = !s.is_empty()
        && !s.starts_with(|c: char| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if plain {
        s.to_string()
    } else {
        quote(s)
    }
}

fn scalar(node: &Node, colors: bool) -> Option<String> {
    let (text, style) = match node {
        Node::Null => ("null".to_string(), Style::new().bold()),
        Node::Number(n) => (format_number(*n), Colour::Yellow.normal()),
        Node::Boolean(b) => (b.to_string(), Colour::Yellow.normal()),
        Node::String(s) => (quote(s), Colour::Green.normal()),
        Node::Array(_) | Node::Object(_) => return None,
    };
    if colors {
        Some(style.paint(text).to_string())
    } else {
        Some(text)
    }
}

fn flat_width(node: &Node) -> usize {
    match node {
        Node::Null => 4,
        Node::Number(n) => format_number(*n).len(),
        Node::Boolean(b) => b.to_string().len(),
        Node::String(s) => quote(s).chars().count(),
        Node::Array(items) if items.is_empty() => 2,
        Node::Object(entries) if entries.is_empty() => 2,
        Node::Array(items) => 4 + items.iter().map(flat_width).sum::<usize>() + 2 * (items.len() - 1),
        Node::Object(entries) => {
            4 + entries
                .iter()
                .map(|(k, v)| key(k).chars().count() + 2 + flat_width(v))
                .sum::<usize>()
                + 2 * (entries.len() - 1)
        }
    }
}

fn render(node: &Node, indent: usize, colors: bool) -> String {
    if let Some(s) = scalar(node, colors) {
        return s;
    }
    let (open, close, entries): (&str, &str, Vec<String>) = match node {
        Node::Array(items) => (
            "[",
            "]",
            items.iter().map(|v| render(v, indent + 2, colors)).collect(),
        ),
        Node::Object(entries) => (
            "{",
            "}",
            entries
                .iter()
                .map(|(k, v)| format!("{}: {}", key(k), render(v, indent + 2, colors)))
                .collect(),
        ),
        _ => return String::new(),
    };
    if entries.is_empty() {
        return format!("{}{}", open, close);
    }
    if indent + flat_width(node) <= MAX_WIDTH {
        format!("{} {} {}", open, entries.join(", "), close)
    } else {
        let pad = " ".repeat(indent + 2);
        let body: Vec<String> = entries.iter().map(|e| format!("{}{}", pad, e)).collect();
        format!("{}\n{}\n{}{}", open, body.join(",\n"), " ".repeat(indent), close)
    }
}
