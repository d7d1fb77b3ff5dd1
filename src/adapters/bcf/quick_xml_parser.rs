//! quick-xml based markup parser adapter.
//!
//! Streams a `markup.bcf` document once and collects the fields the
//! importer needs:
//!
//! ```text
//! Markup/Topic/@TopicStatus
//! Markup/Topic/Title
//! Markup/Topic/Description
//! Markup/Viewpoints[@Guid]/{Viewpoint,Snapshot}
//! Markup/Comment[@Guid]/{Date,Author,Comment}
//! ```
//!
//! Element text is the concatenation of the element's direct text and
//! CDATA children. Text of nested elements is not included. Elements are
//! matched by local name, so namespace prefixes are ignored.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::domain::bcf::{CommentRecord, MarkupDocument, MarkupError, ViewpointRecord};
use crate::ports::MarkupParser;

/// Streaming implementation of MarkupParser.
///
/// Checks well-formedness only. Documents whose root is not `Markup`
/// parse successfully into an empty document.
#[derive(Debug, Clone, Default)]
pub struct QuickXmlMarkupParser;

impl QuickXmlMarkupParser {
    pub fn new() -> Self {
        Self
    }
}

impl MarkupParser for QuickXmlMarkupParser {
    fn parse(&self, xml: &[u8]) -> Result<MarkupDocument, MarkupError> {
        let mut reader = Reader::from_reader(xml);
        let mut collector = MarkupCollector::default();
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| MarkupError::malformed(reader.error_position(), e.to_string()))?;
            let position = reader.buffer_position();

            match event {
                Event::Start(element) => collector.open(&element, position)?,
                Event::Empty(element) => {
                    collector.open(&element, position)?;
                    collector.close(position)?;
                }
                Event::End(_) => collector.close(position)?,
                Event::Text(text) => {
                    let text = text
                        .decode()
                        .map_err(|e| MarkupError::malformed(position, e.to_string()))?;
                    collector.text(&text, position)?;
                }
                Event::CData(cdata) => {
                    let text = std::str::from_utf8(&cdata)
                        .map_err(|e| MarkupError::malformed(position, e.to_string()))?;
                    collector.text(text, position)?;
                }
                Event::GeneralRef(reference) => {
                    let resolved = match reference
                        .resolve_char_ref()
                        .map_err(|e| MarkupError::malformed(position, e.to_string()))?
                    {
                        Some(ch) => ch.to_string(),
                        None => {
                            let name = reference
                                .decode()
                                .map_err(|e| MarkupError::malformed(position, e.to_string()))?;
                            resolve_predefined_entity(&name)
                                .ok_or_else(|| {
                                    MarkupError::malformed(
                                        position,
                                        format!("undefined entity &{};", name),
                                    )
                                })?
                                .to_string()
                        }
                    };
                    collector.text(&resolved, position)?;
                }
                Event::Eof => return collector.finish(position),
                _ => {}
            }
            buf.clear();
        }
    }
}

/// Where a piece of character data belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Title,
    Description,
    ViewpointRef,
    SnapshotRef,
    CommentDate,
    CommentAuthor,
    CommentBody,
}

#[derive(Debug, Default)]
struct MarkupCollector {
    path: Vec<String>,
    root_seen: bool,
    title: String,
    description: String,
    status_token: String,
    viewpoints: Vec<ViewpointRecord>,
    comments: Vec<CommentRecord>,
}

impl MarkupCollector {
    fn open(&mut self, element: &BytesStart<'_>, position: u64) -> Result<(), MarkupError> {
        if self.path.is_empty() && self.root_seen {
            return Err(MarkupError::malformed(position, "more than one root element"));
        }

        let name = std::str::from_utf8(element.local_name().as_ref())
            .map_err(|e| MarkupError::malformed(position, e.to_string()))?
            .to_string();
        let attributes = read_attributes(element, position)?;

        self.path.push(name);
        self.root_seen = true;

        if self.at(&["Markup", "Topic"]) {
            if let Some(status) = lookup(&attributes, "TopicStatus") {
                self.status_token.push_str(status);
            }
        } else if self.at(&["Markup", "Viewpoints"]) {
            self.viewpoints.push(ViewpointRecord {
                uuid: lookup(&attributes, "Guid").unwrap_or_default().to_string(),
                ..ViewpointRecord::default()
            });
        } else if self.at(&["Markup", "Comment"]) {
            self.comments.push(CommentRecord {
                uuid: lookup(&attributes, "Guid").unwrap_or_default().to_string(),
                ..CommentRecord::default()
            });
        }
        Ok(())
    }

    fn close(&mut self, position: u64) -> Result<(), MarkupError> {
        self.path
            .pop()
            .map(|_| ())
            .ok_or_else(|| MarkupError::malformed(position, "closing tag without opening tag"))
    }

    fn text(&mut self, text: &str, position: u64) -> Result<(), MarkupError> {
        if self.path.is_empty() {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(MarkupError::malformed(position, "text outside of root element"));
        }

        let Some(slot) = self.slot() else {
            return Ok(());
        };
        let target = match slot {
            Slot::Title => Some(&mut self.title),
            Slot::Description => Some(&mut self.description),
            Slot::ViewpointRef => self.viewpoints.last_mut().map(|vp| &mut vp.viewpoint_ref),
            Slot::SnapshotRef => self.viewpoints.last_mut().map(|vp| &mut vp.snapshot_ref),
            Slot::CommentDate => self.comments.last_mut().map(|c| &mut c.date),
            Slot::CommentAuthor => self.comments.last_mut().map(|c| &mut c.author_email),
            Slot::CommentBody => self.comments.last_mut().map(|c| &mut c.body),
        };
        if let Some(target) = target {
            target.push_str(text);
        }
        Ok(())
    }

    fn finish(self, position: u64) -> Result<MarkupDocument, MarkupError> {
        if let Some(open) = self.path.last() {
            return Err(MarkupError::malformed(
                position,
                format!("unexpected end of document, <{}> is not closed", open),
            ));
        }
        if !self.root_seen {
            return Err(MarkupError::malformed(position, "document has no root element"));
        }

        Ok(MarkupDocument::new(
            self.title,
            self.description,
            self.status_token,
            self.viewpoints,
            self.comments,
        ))
    }

    fn slot(&self) -> Option<Slot> {
        let path: Vec<&str> = self.path.iter().map(String::as_str).collect();
        match path.as_slice() {
            ["Markup", "Topic", "Title"] => Some(Slot::Title),
            ["Markup", "Topic", "Description"] => Some(Slot::Description),
            ["Markup", "Viewpoints", "Viewpoint"] => Some(Slot::ViewpointRef),
            ["Markup", "Viewpoints", "Snapshot"] => Some(Slot::SnapshotRef),
            ["Markup", "Comment", "Date"] => Some(Slot::CommentDate),
            ["Markup", "Comment", "Author"] => Some(Slot::CommentAuthor),
            ["Markup", "Comment", "Comment"] => Some(Slot::CommentBody),
            _ => None,
        }
    }

    fn at(&self, expected: &[&str]) -> bool {
        self.path.len() == expected.len()
            && self.path.iter().zip(expected).all(|(name, want)| name == want)
    }
}

/// Reads every attribute so malformed attribute syntax is reported.
fn read_attributes(
    element: &BytesStart<'_>,
    position: u64,
) -> Result<Vec<(String, String)>, MarkupError> {
    element
        .attributes()
        .map(|attr| {
            let attr = attr.map_err(|e| MarkupError::malformed(position, e.to_string()))?;
            let key = std::str::from_utf8(attr.key.local_name().as_ref())
                .map_err(|e| MarkupError::malformed(position, e.to_string()))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| MarkupError::malformed(position, e.to_string()))?
                .into_owned();
            Ok((key, value))
        })
        .collect()
}

fn lookup<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}
