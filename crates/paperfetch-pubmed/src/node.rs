//! Owned XML element tree for PubMed efetch documents
//!
//! efetch returns a `<PubmedArticleSet>`; each `<PubmedArticle>` (or
//! `<PubmedBookArticle>`) is materialised into an [`XmlNode`] so record
//! extraction can use path lookups with fallbacks instead of a state machine.

use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Element names that delimit one article inside an efetch response.
const ARTICLE_TAGS: &[&[u8]] = &[b"PubmedArticle", b"PubmedBookArticle"];

/// Root elements efetch produces: an article set, or an error envelope.
const ROOT_TAGS: &[&[u8]] = &[b"PubmedArticleSet", b"eFetchResult"];

/// Deepest element nesting accepted inside one article.
const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
enum Content {
    Element(XmlNode),
    Text(String),
}

/// One XML element with its children in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlNode {
    name: String,
    content: Vec<Content>,
}

impl XmlNode {
    /// Local element name (namespace prefix stripped).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlNode> {
        self.content.iter().filter_map(|c| match c {
            Content::Element(node) => Some(node),
            Content::Text(_) => None,
        })
    }

    /// Direct children with the given name.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.elements().filter(move |n| n.name == name)
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.elements().find(|n| n.name == name)
    }

    /// First descendant (excluding self) with the given name, in document order.
    pub fn descendant(&self, name: &str) -> Option<&XmlNode> {
        self.elements()
            .find_map(|n| if n.name == name { Some(n) } else { n.descendant(name) })
    }

    /// All text below this element, inline markup flattened, whitespace collapsed.
    pub fn text(&self) -> String {
        let mut raw = String::new();
        self.collect_text(&mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// All text below this element with only leading and trailing whitespace removed.
    pub fn trimmed_text(&self) -> String {
        let mut raw = String::new();
        self.collect_text(&mut raw);
        raw.trim().to_string()
    }

    /// Text of the first child named `name`, if present and non-blank.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(XmlNode::text).filter(|t| !t.is_empty())
    }

    /// Text of the first descendant named `name`, if present and non-blank.
    pub fn descendant_text(&self, name: &str) -> Option<String> {
        self.descendant(name).map(XmlNode::text).filter(|t| !t.is_empty())
    }

    fn collect_text(&self, out: &mut String) {
        for c in &self.content {
            match c {
                Content::Text(t) => out.push_str(t),
                // Inline markup joins without spaces: H<sub>2</sub>O stays "H2O"
                Content::Element(node) => node.collect_text(out),
            }
        }
    }
}

/// Parse a single XML document into its root element.
#[cfg(test)]
pub(crate) fn parse_document(xml: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).context("XML parse error")? {
            Event::Start(e) => {
                let name = local_name(e.local_name().as_ref());
                return read_element(&mut reader, name, 1);
            }
            Event::Empty(e) => return Ok(empty_element(e.local_name().as_ref())),
            Event::Eof => bail!("document has no root element"),
            _ => {}
        }
        buf.clear();
    }
}

/// Result of splitting an efetch response into articles.
#[derive(Debug, Default)]
pub struct ArticleSet {
    pub articles: Vec<XmlNode>,
    /// Text of any `<ERROR>` elements the service embedded in the response
    pub errors: Vec<String>,
}

/// Split an efetch `<PubmedArticleSet>` into one node per article.
///
/// Anything that is not well-formed XML, or whose root is not an efetch
/// envelope, is an error; missing fields inside an article are not (they are
/// handled during extraction).
pub fn parse_article_set(xml: &str) -> Result<ArticleSet> {
    let mut reader = Reader::from_str(xml);
    let mut set = ArticleSet::default();
    let mut buf = Vec::new();
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buf).context("XML parse error")? {
            Event::Start(e) | Event::Empty(e) if !saw_root => {
                let name = e.local_name();
                if !ROOT_TAGS.contains(&name.as_ref()) {
                    bail!("unexpected root element <{}>", local_name(name.as_ref()));
                }
                saw_root = true;
            }
            Event::Start(e) if ARTICLE_TAGS.contains(&e.local_name().as_ref()) => {
                let name = local_name(e.local_name().as_ref());
                set.articles.push(read_element(&mut reader, name, 2)?);
            }
            Event::Start(e) if e.local_name().as_ref() == b"ERROR" => {
                let node = read_element(&mut reader, "ERROR".to_string(), 2)?;
                set.errors.push(node.text());
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        bail!("response contains no XML elements");
    }

    Ok(set)
}

/// Read the element whose start tag was just consumed, up to its end tag.
///
/// `depth` is the nesting level of that element; past [`MAX_DEPTH`] the document is rejected.
fn read_element(reader: &mut Reader<&[u8]>, name: String, depth: usize) -> Result<XmlNode> {
    if depth > MAX_DEPTH {
        bail!("elements nested deeper than {MAX_DEPTH} levels");
    }
    let mut node = XmlNode {
        name,
        content: Vec::new(),
    };
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let child = local_name(e.local_name().as_ref());
                node.content
                    .push(Content::Element(read_element(reader, child, depth + 1)?));
            }
            Event::Empty(e) => node
                .content
                .push(Content::Element(empty_element(e.local_name().as_ref()))),
            Event::Text(t) => node.content.push(Content::Text(t.unescape()?.into_owned())),
            Event::CData(t) => node
                .content
                .push(Content::Text(String::from_utf8_lossy(t.as_ref()).into_owned())),
            Event::End(_) => break,
            Event::Eof => bail!("unexpected end of document inside <{}>", node.name),
            _ => {}
        }
        buf.clear();
    }

    Ok(node)
}

fn empty_element(name: &[u8]) -> XmlNode {
    XmlNode {
        name: local_name(name),
        content: Vec::new(),
    }
}

fn local_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}
