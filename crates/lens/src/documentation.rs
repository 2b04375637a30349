//! Parsed view of a documentation comment.

use itertools::Itertools;
use prism_compiler_parser::doc::{parse_doc_xml, DocNode};

/// The parts of a `///` comment generators read: summary, remarks, returns and
/// per-parameter text. Text is whitespace-normalized; references render as the
/// name they point to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Documentation {
    pub summary: Option<String>,
    pub remarks: Option<String>,
    pub returns: Option<String>,
    /// `(name, text)` for each `<param>`, in written order.
    pub params: Vec<(String, String)>,
    /// `(name, text)` for each `<typeparam>`, in written order.
    pub type_params: Vec<(String, String)>,
}

impl Documentation {
    /// Parses raw comment XML. `None` when the XML is malformed.
    pub fn parse(xml: &str) -> Option<Self> {
        let nodes = match parse_doc_xml(xml) {
            Ok(nodes) => nodes,
            Err(errors) => {
                tracing::debug!(?errors, "malformed documentation comment");
                return None;
            }
        };

        let mut documentation = Self::default();
        for node in &nodes {
            let DocNode::Element { name, .. } = node else { continue };
            let text = normalize(&node.inner_text());
            match name.as_str() {
                "summary" => documentation.summary = Some(text),
                "remarks" => documentation.remarks = Some(text),
                "returns" => documentation.returns = Some(text),
                "param" | "typeparam" => {
                    let Some(param) = node.attribute("name") else { continue };
                    let entry = (param.to_string(), text);
                    if name == "param" {
                        documentation.params.push(entry);
                    } else {
                        documentation.type_params.push(entry);
                    }
                }
                _ => {}
            }
        }
        Some(documentation)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, text)| text.as_str())
    }

    pub fn type_param(&self, name: &str) -> Option<&str> {
        self.type_params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, text)| text.as_str())
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace().join(" ")
}
