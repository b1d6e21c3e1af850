//! Owned XML element tree

use crate::error::{Error, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

/// An element with its attributes, text content and child elements
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Tag name
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Text content, whitespace-only text excluded
    pub text: Option<String>,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a leaf element carrying `text`
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Parse a document and return its root element
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::xml(format!("at position {}: {e}", reader.buffer_position()))
            })?;

            match event {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::xml("closing tag without an open element"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| Error::xml(e.to_string()))?;
                    if text.trim().is_empty() {
                        continue;
                    }
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&text);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.push_text(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::xml(format!("unclosed element <{}>", open.name)));
        }

        root.ok_or_else(|| Error::xml("document has no root element"))
    }

    /// Append a child element
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Text content, if any
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// First direct child named `name`
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Direct children named `name`
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First descendant named `name`, depth first
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find_map(|child| {
            if child.name == name {
                Some(child)
            } else {
                child.find(name)
            }
        })
    }

    /// All descendants named `name`, in document order
    pub fn find_all(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            found.extend(child.find_all(name));
        }
        found
    }

    /// Take the outermost descendants named `name`, in document order
    ///
    /// Elements nested inside a match stay inside it.
    pub fn take_outermost(self, name: &str) -> Vec<XmlElement> {
        let mut found = Vec::new();
        collect_outermost(self.children, name, &mut found);
        found
    }

    /// Serialize without an XML declaration
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_into(&mut writer)?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| Error::xml(format!("serialized document is not UTF-8: {e}")))
    }

    fn write_into<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.text.is_none() && self.children.is_empty() {
            return write_event(writer, Event::Empty(start));
        }

        write_event(writer, Event::Start(start))?;
        if let Some(text) = &self.text {
            write_event(writer, Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_into(writer)?;
        }
        write_event(writer, Event::End(BytesEnd::new(self.name.as_str())))
    }

    fn push_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| Error::xml(format!("tag name is not UTF-8: {e}")))?
        .to_string();

    let mut element = XmlElement::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| Error::xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| Error::xml(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push(element);
        return Ok(());
    }

    if root.is_some() {
        return Err(Error::xml(format!(
            "unexpected second root element <{}>",
            element.name
        )));
    }

    *root = Some(element);
    Ok(())
}

fn collect_outermost(children: Vec<XmlElement>, name: &str, found: &mut Vec<XmlElement>) {
    for child in children {
        if child.name == name {
            found.push(child);
        } else {
            collect_outermost(child.children, name, found);
        }
    }
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::xml(format!("failed to write element: {e}")))
}
