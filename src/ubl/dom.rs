//! Owned element tree over a UBL document.
//!
//! DIAN documents arrive with shifting namespace prefixes (`cbc:`, `cbc2:`,
//! none at all), so elements are keyed by local name only. The tree carries
//! exactly what extraction needs: names, concatenated text (including CDATA
//! runs), and children in document order. Attributes are not retained; no
//! lookup in this domain reads one.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::core::{ExtractError, Result};

/// One element of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Local name (prefix stripped).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concatenated character data of this element (not of descendants).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Trimmed text, `None` when blank. Blank and missing are equivalent
    /// everywhere in the extraction contract.
    pub fn nonblank_text(&self) -> Option<&str> {
        let t = self.text.trim();
        if t.is_empty() { None } else { Some(t) }
    }

    /// Direct children in document order.
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Resolve a relative path of direct-child names, backtracking over
    /// same-named siblings. An empty path resolves to `self`.
    pub fn child_at(&self, path: &[&str]) -> Option<&XmlElement> {
        let (first, rest) = match path.split_first() {
            Some(split) => split,
            None => return Some(self),
        };
        self.children
            .iter()
            .filter(|c| c.name == *first)
            .find_map(|c| c.child_at(rest))
    }

    /// First descendant with the given local name, pre-order (self excluded).
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants with the given local name, pre-order.
    pub fn find_all(&self, name: &str) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        self.collect_named(name, &mut out);
        out
    }

    fn collect_named<'a>(&'a self, name: &str, out: &mut Vec<&'a XmlElement>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.collect_named(name, out);
        }
    }

    /// Resolve a descendant path: any descendant matching `path[0]`, then the
    /// remaining names as a direct-child chain. Mirrors `.//a/b/c`.
    pub fn find_at(&self, path: &[&str]) -> Option<&XmlElement> {
        let (first, rest) = path.split_first()?;
        self.find_all(first)
            .into_iter()
            .find_map(|el| el.child_at(rest))
    }

    /// Text of a direct-child chain, `None` when the element is missing or
    /// blank. This is the lookup-with-default contract: callers supply a
    /// default via [`XmlElement::text_at_or`] for optional fields and map
    /// `None` to a data error for required ones.
    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        self.child_at(path).and_then(XmlElement::nonblank_text)
    }

    /// Like [`XmlElement::text_at`], substituting `default` for missing or
    /// blank values.
    pub fn text_at_or<'a>(&'a self, path: &[&str], default: &'a str) -> &'a str {
        self.text_at(path).unwrap_or(default)
    }

    /// Text of the first descendant with the given local name.
    pub fn find_text(&self, name: &str) -> Option<&str> {
        self.find(name).and_then(XmlElement::nonblank_text)
    }
}

/// Parse one XML document into its root element.
///
/// Malformed input (mismatched tags, truncated documents, bad escapes) maps
/// to [`ExtractError::Format`].
pub fn parse(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = std::str::from_utf8(e.name().local_name().as_ref())
                    .unwrap_or_default()
                    .to_string();
                stack.push(XmlElement::new(name));
            }
            Ok(Event::Empty(ref e)) => {
                let name = std::str::from_utf8(e.name().local_name().as_ref())
                    .unwrap_or_default()
                    .to_string();
                attach(&mut stack, &mut root, XmlElement::new(name))?;
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| ExtractError::Format(format!("bad character data: {err}")))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                let bytes = e.into_inner();
                let text = std::str::from_utf8(&bytes)
                    .map_err(|err| ExtractError::Format(format!("bad CDATA: {err}")))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(text);
                }
            }
            Ok(Event::End(_)) => {
                let closed = stack
                    .pop()
                    .ok_or_else(|| ExtractError::Format("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, closed)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractError::Format(format!("XML parse error: {e}")));
            }
        }
    }

    if !stack.is_empty() {
        return Err(ExtractError::Format("unexpected end of document".into()));
    }
    root.ok_or_else(|| ExtractError::Format("document has no root element".into()))
}

fn attach(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(ExtractError::Format(
            "content after the document root".into(),
        ));
    }
    Ok(())
}
