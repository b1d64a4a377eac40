//! XML reading and writing for LIMS process and artifact documents

use crate::error::SparkError;
use crate::lims::{ArtifactType, Process, Udf};
use anyhow::Result;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use roxmltree::{Document, Node};

/// Namespace of user-defined fields
pub const UDF_NAMESPACE: &str = "http://genologics.com/ri/userdefined";

/// Namespace of file references
pub const FILE_NAMESPACE: &str = "http://genologics.com/ri/file";

/// Root children that follow the UDF block in an artifact document
const TRAILING_ELEMENTS: [&[u8]; 4] = [b"artifact-group", b"workflow-stages", b"demux", b"file"];

/// Fields of an artifact document
#[derive(Debug, Clone)]
pub struct ParsedArtifact {
    pub limsid: String,
    pub name: String,
    pub artifact_type: ArtifactType,
    pub location: Option<String>,
    pub udfs: Vec<Udf>,
    pub files: Vec<String>,
}

fn parse_document<'a>(xml: &'a str, kind: &str) -> Result<Document<'a>> {
    Document::parse(xml)
        .map_err(|e| SparkError::lims(format!("Failed to parse {kind} XML: {e}")).into())
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
        .and_then(|child| child.text())
}

/// Parse a process document into its unique inputs and outputs
///
/// # Errors
///
/// Returns a LIMS error if the XML is malformed or the root is not a process
pub fn parse_process(xml: &str) -> Result<Process> {
    let doc = parse_document(xml, "process")?;
    let root = doc.root_element();
    if root.tag_name().name() != "process" {
        return Err(SparkError::lims(format!(
            "Expected a process document, found <{}>",
            root.tag_name().name()
        ))
        .into());
    }

    let mut process = Process {
        limsid: root.attribute("limsid").unwrap_or_default().to_owned(),
        inputs: Vec::new(),
        outputs: Vec::new(),
    };

    for io_map in root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "input-output-map")
    {
        for node in io_map.children().filter(Node::is_element) {
            let Some(limsid) = node.attribute("limsid") else {
                continue;
            };
            match node.tag_name().name() {
                "input" => {
                    if !process.inputs.iter().any(|id| id == limsid) {
                        process.inputs.push(limsid.to_owned());
                    }
                }
                "output" => {
                    if !process.outputs.iter().any(|id| id == limsid) {
                        process.outputs.push(limsid.to_owned());
                    }
                }
                _ => {}
            }
        }
    }

    Ok(process)
}

/// Parse an artifact document
///
/// # Errors
///
/// Returns a LIMS error if the XML is malformed or the root is not an artifact
pub fn parse_artifact(xml: &str) -> Result<ParsedArtifact> {
    let doc = parse_document(xml, "artifact")?;
    let root = doc.root_element();
    if root.tag_name().name() != "artifact" {
        return Err(SparkError::lims(format!(
            "Expected an artifact document, found <{}>",
            root.tag_name().name()
        ))
        .into());
    }

    let mut artifact = ParsedArtifact {
        limsid: root.attribute("limsid").unwrap_or_default().to_owned(),
        name: String::new(),
        artifact_type: ArtifactType::Other(String::new()),
        location: None,
        udfs: Vec::new(),
        files: Vec::new(),
    };

    for child in root.children().filter(Node::is_element) {
        let tag = child.tag_name();
        match (tag.namespace(), tag.name()) {
            (Some(UDF_NAMESPACE), "field") => artifact.udfs.push(Udf {
                name: child.attribute("name").unwrap_or_default().to_owned(),
                field_type: child.attribute("type").map(str::to_owned),
                value: child.text().unwrap_or_default().to_owned(),
            }),
            (Some(FILE_NAMESPACE), "file") => {
                if let Some(limsid) = child.attribute("limsid") {
                    artifact.files.push(limsid.to_owned());
                }
            }
            (None, "name") => artifact.name = child.text().unwrap_or_default().to_owned(),
            (None, "type") => artifact.artifact_type = child.text().unwrap_or_default().into(),
            (None, "location") => {
                artifact.location = child_text(child, "value").map(str::to_owned);
            }
            _ => {}
        }
    }

    Ok(artifact)
}

fn is_udf_field(element: &BytesStart<'_>) -> bool {
    element.local_name().as_ref() == b"field"
}

fn is_trailing(element: &BytesStart<'_>) -> bool {
    TRAILING_ELEMENTS.contains(&element.local_name().as_ref())
}

/// Remove and return the pending value for this UDF element, if any
fn take_pending<'u>(
    pending: &mut Vec<(&'u str, &'u str)>,
    element: &BytesStart<'_>,
) -> Result<Option<&'u str>> {
    let Some(attr) = element.try_get_attribute("name")? else {
        return Ok(None);
    };
    let name = attr.decode_and_unescape_value(element.decoder())?;
    let position = pending.iter().position(|(pending_name, _)| *pending_name == name);
    Ok(position.map(|index| pending.remove(index).1))
}

fn write_new_fields(writer: &mut Writer<Vec<u8>>, pending: &mut Vec<(&str, &str)>) -> Result<()> {
    for (name, value) in pending.drain(..) {
        let start =
            BytesStart::new("udf:field").with_attributes([("type", "Numeric"), ("name", name)]);
        writer.write_event(Event::Start(start))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new("udf:field")))?;
    }
    Ok(())
}

/// Rewrite an artifact document with updated UDF values
///
/// Existing fields keep their position and attributes and get the new text.
/// Fields the artifact does not carry yet are written after the last UDF, or
/// before the first element that follows the UDF block, or before the closing
/// root tag. Everything else is copied unchanged.
///
/// # Errors
///
/// Returns a LIMS error if the document cannot be read
pub fn write_artifact_udfs(raw: &str, updates: &[(&str, &str)]) -> Result<String> {
    let mut pending: Vec<(&str, &str)> = updates.to_vec();
    let mut reader = Reader::from_str(raw);
    let mut writer = Writer::new(Vec::new());

    let mut depth = 0_usize;
    let mut replacing = false;
    let mut seen_udf = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| SparkError::lims(format!("Failed to read artifact XML: {e}")))?;

        match event {
            Event::Eof => break,
            Event::End(end) => {
                if replacing && depth == 2 {
                    replacing = false;
                } else if depth == 1 {
                    write_new_fields(&mut writer, &mut pending)?;
                }
                depth = depth.saturating_sub(1);
                writer.write_event(Event::End(end))?;
            }
            // old value of a replaced field
            _ if replacing => {}
            Event::Start(start) => {
                depth += 1;
                if depth == 2 {
                    if is_udf_field(&start) {
                        seen_udf = true;
                        if let Some(value) = take_pending(&mut pending, &start)? {
                            writer.write_event(Event::Start(start))?;
                            writer.write_event(Event::Text(BytesText::new(value)))?;
                            replacing = true;
                            continue;
                        }
                    } else if seen_udf || is_trailing(&start) {
                        write_new_fields(&mut writer, &mut pending)?;
                    }
                }
                writer.write_event(Event::Start(start))?;
            }
            Event::Empty(empty) => {
                if depth == 1 {
                    if is_udf_field(&empty) {
                        seen_udf = true;
                        if let Some(value) = take_pending(&mut pending, &empty)? {
                            let qname = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                            writer.write_event(Event::Start(empty))?;
                            writer.write_event(Event::Text(BytesText::new(value)))?;
                            writer.write_event(Event::End(BytesEnd::new(qname)))?;
                            continue;
                        }
                    } else if seen_udf || is_trailing(&empty) {
                        write_new_fields(&mut writer, &mut pending)?;
                    }
                }
                writer.write_event(Event::Empty(empty))?;
            }
            other => writer.write_event(other)?,
        }
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| SparkError::lims(format!("Artifact XML is not valid UTF-8: {e}")).into())
}
