//! # Documentation Comments
//!
//! Extraction of the `///` lines attached to a declaration and a small `chumsky`
//! parser for the XML they contain. Only elements, attributes, text and the five
//! predefined entities are understood; that is all documentation comments use.

use chumsky::prelude::*;

use crate::syntax_kind::SyntaxKind::DOC_COMMENT;
use crate::SyntaxNode;

/// Raw XML of the doc comment lines that lead `node`, or `None` if it has none.
pub fn doc_comment_xml(node: &SyntaxNode) -> Option<String> {
    let lines: Vec<String> = node
        .children_with_tokens()
        .map_while(|element| element.into_token().filter(|t| t.kind().is_trivia()))
        .filter(|token| token.kind() == DOC_COMMENT)
        .map(|token| {
            let line = token.text().trim_start_matches("///");
            line.strip_prefix(' ').unwrap_or(line).trim_end().to_string()
        })
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// One node of a parsed documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocNode {
    Text(String),
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<DocNode>,
    },
}

impl DocNode {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        match self {
            Self::Element { attributes, .. } => attributes
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str()),
            Self::Text(_) => None,
        }
    }

    /// Plain text of this node. References (`<see cref>`, `<paramref name>`...) are
    /// rendered as the name they point to.
    pub fn inner_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Element { name, children, .. } => {
                let reference = match name.as_str() {
                    "see" | "seealso" => self
                        .attribute("cref")
                        .map(|cref| strip_cref_prefix(cref).to_string())
                        .or_else(|| self.attribute("langword").map(str::to_string)),
                    "paramref" | "typeparamref" => self.attribute("name").map(str::to_string),
                    _ => None,
                };
                match reference {
                    Some(reference) if children.is_empty() => reference,
                    _ => children.iter().map(Self::inner_text).collect(),
                }
            }
        }
    }
}

/// `T:Ns.Type` -> `Ns.Type`
fn strip_cref_prefix(cref: &str) -> &str {
    match cref.split_once(':') {
        Some((prefix, rest)) if prefix.len() == 1 => rest,
        _ => cref,
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn xml_parser<'src>() -> impl Parser<'src, &'src str, Vec<DocNode>, extra::Err<Rich<'src, char>>> {
    let name = any()
        .filter(|c: &char| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
        .repeated()
        .at_least(1)
        .collect::<String>();

    let whitespace = one_of(" \t\r\n").repeated();

    let double_quoted = just('"')
        .ignore_then(none_of("\"").repeated().collect::<String>())
        .then_ignore(just('"'));
    let single_quoted = just('\'')
        .ignore_then(none_of("'").repeated().collect::<String>())
        .then_ignore(just('\''));
    let attribute = one_of(" \t\r\n")
        .repeated()
        .at_least(1)
        .ignore_then(name.clone())
        .then_ignore(just('=').padded())
        .then(double_quoted.or(single_quoted))
        .map(|(key, value)| (key, decode_entities(&value)));

    let open_tag = just('<')
        .ignore_then(name.clone())
        .then(attribute.repeated().collect::<Vec<_>>())
        .then_ignore(whitespace.clone());

    recursive(|nodes| {
        let self_closing = open_tag
            .clone()
            .then_ignore(just("/>"))
            .map(|(name, attributes)| DocNode::Element {
                name,
                attributes,
                children: Vec::new(),
            });

        let element = open_tag
            .then_ignore(just('>'))
            .then(nodes)
            .then_ignore(just("</"))
            .then(name.clone())
            .then_ignore(whitespace)
            .then_ignore(just('>'))
            .try_map(|(((name, attributes), children), close), span| {
                if name == close {
                    Ok(DocNode::Element {
                        name,
                        attributes,
                        children,
                    })
                } else {
                    Err(Rich::custom(
                        span,
                        format!("closing tag </{close}> does not match <{name}>"),
                    ))
                }
            });

        let text = none_of("<")
            .repeated()
            .at_least(1)
            .collect::<String>()
            .map(|text| DocNode::Text(decode_entities(&text)));

        choice((self_closing, element, text))
            .repeated()
            .collect::<Vec<_>>()
    })
    .then_ignore(end())
}

/// Parses documentation XML into nodes. Malformed XML yields the parser's messages.
pub fn parse_doc_xml(xml: &str) -> Result<Vec<DocNode>, Vec<String>> {
    xml_parser()
        .parse(xml)
        .into_result()
        .map_err(|errors| errors.into_iter().map(|e| e.to_string()).collect())
}
