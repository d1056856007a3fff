//! HTML subset → Telegraph node tree
//!
//! Telegraph's `createPage` takes `content` as a JSON array of nodes, where a node is either a
//! string or `{tag, attrs?, children?}`. Only a fixed set of tags is accepted by the host.

use std::collections::BTreeMap;

use select::document::Document;
use select::node::Node as HtmlNode;
use select::predicate::Name;
use serde::Serialize;
use thiserror::Error;

/// Tags the document host renders.
pub const ALLOWED_TAGS: &[&str] = &[
    "a", "aside", "b", "blockquote", "br", "code", "em", "figcaption", "figure", "h3", "h4", "hr", "i", "iframe",
    "img", "li", "ol", "p", "pre", "s", "strong", "u", "ul", "video",
];

/// Attributes kept on allowed tags; everything else is dropped.
pub const ALLOWED_ATTRS: &[&str] = &["href", "src"];

/// Telegram presentation wrappers: removed, children kept.
const UNWRAPPED_TAGS: &[&str] = &["span", "tg-spoiler"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeError {
    #[error("tag <{0}> is not allowed")]
    NotAllowedTag(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }
}

/// Parses `html` and converts it to nodes.
///
/// The parser is lenient, so malformed markup never fails; only tags outside
/// [`ALLOWED_TAGS`] do.
pub fn html_to_nodes(html: &str) -> Result<Vec<Node>, NodeError> {
    let document = Document::from(html);
    let mut nodes = Vec::new();

    // html5ever hoists some tags (e.g. <script>, <style>) into <head>
    for section in ["head", "body"] {
        if let Some(root) = document.find(Name(section)).next() {
            convert_children(root, &mut nodes)?;
        }
    }

    Ok(nodes)
}

fn convert_children(parent: HtmlNode<'_>, out: &mut Vec<Node>) -> Result<(), NodeError> {
    for child in parent.children() {
        if let Some(text) = child.as_text() {
            if !text.is_empty() {
                out.push(Node::Text(text.to_string()));
            }
            continue;
        }

        // Comments and other non-element nodes
        let Some(name) = child.name() else {
            continue;
        };
        let tag = name.to_ascii_lowercase();

        if UNWRAPPED_TAGS.contains(&tag.as_str()) {
            convert_children(child, out)?;
            continue;
        }
        if !ALLOWED_TAGS.contains(&tag.as_str()) {
            return Err(NodeError::NotAllowedTag(tag));
        }

        let mut element = Element::new(&tag);
        for attr in ALLOWED_ATTRS {
            if let Some(value) = child.attr(attr) {
                element.attrs.insert((*attr).to_string(), value.to_string());
            }
        }
        convert_children(child, &mut element.children)?;
        out.push(Node::Element(element));
    }
    Ok(())
}

/// Text content of `html` with tags dropped and entities decoded.
pub fn html_to_text(html: &str) -> String {
    let document = Document::from(html);
    ["head", "body"]
        .iter()
        .filter_map(|section| document.find(Name(*section)).next())
        .map(|root| root.text())
        .collect()
}

/// Plain character count of the text inside `nodes`.
pub fn text_len(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Text(text) => text.chars().count(),
            Node::Element(element) => text_len(&element.children),
        })
        .sum()
}
