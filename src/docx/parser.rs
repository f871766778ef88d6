//! Main document part parsing: `word/document.xml` -> [`Block`] sequence.
//!
//! Only direct children of `w:body` become blocks. Paragraphs are decoded
//! into runs; any other body element is kept verbatim as an [`OpaqueBlock`].
//! The body's trailing `w:sectPr` is dropped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::xml::{attr_value, local_name, resolve_entity};
use crate::model::{Alignment, Block, BreakKind, Inline, OpaqueBlock, Paragraph, Run, RunStyle};

/// Run children whose subtrees are skipped (drawings, text boxes, embedded objects).
const SKIPPED_RUN_CONTENT: &[&[u8]] = &[b"drawing", b"pict", b"object", b"AlternateContent"];

/// Body-level range and marker elements. They carry no content and never
/// take a block index.
const BODY_MARKERS: &[&[u8]] = &[
    b"bookmarkStart",
    b"bookmarkEnd",
    b"proofErr",
    b"permStart",
    b"permEnd",
    b"commentRangeStart",
    b"commentRangeEnd",
    b"moveFromRangeStart",
    b"moveFromRangeEnd",
    b"moveToRangeStart",
    b"moveToRangeEnd",
    b"customXmlInsRangeStart",
    b"customXmlInsRangeEnd",
    b"customXmlDelRangeStart",
    b"customXmlDelRangeEnd",
];

#[derive(Default)]
struct ParagraphState {
    paragraph: Paragraph,
    run: Option<Run>,
    in_ppr: bool,
    in_rpr: bool,
    in_text: bool,
}

/// Parse the main document part into body blocks.
pub fn parse_document(xml: &str) -> Result<Vec<Block>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut blocks = Vec::new();
    let mut in_body = false;
    let mut state: Option<ParagraphState> = None;

    loop {
        let start = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                if let Some(st) = state.as_mut() {
                    if st.run.is_some() && SKIPPED_RUN_CONTENT.contains(&local) {
                        reader.read_to_end(name)?;
                    } else {
                        paragraph_start(st, &e, local);
                    }
                } else if !in_body {
                    in_body = local == b"body";
                } else {
                    match local {
                        b"p" => state = Some(ParagraphState::default()),
                        b"sectPr" => {
                            reader.read_to_end(name)?;
                        }
                        _ if BODY_MARKERS.contains(&local) => {
                            reader.read_to_end(name)?;
                        }
                        _ => {
                            reader.read_to_end(name)?;
                            let end = reader.buffer_position() as usize;
                            blocks.push(opaque_block(&xml[start..end])?);
                        }
                    }
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                if let Some(st) = state.as_mut() {
                    paragraph_empty(st, &e, local);
                } else if in_body {
                    match local {
                        b"p" => blocks.push(Block::Paragraph(Paragraph::new())),
                        b"sectPr" => {}
                        _ if BODY_MARKERS.contains(&local) => {}
                        _ => {
                            let end = reader.buffer_position() as usize;
                            blocks.push(opaque_block(&xml[start..end])?);
                        }
                    }
                }
            }
            Event::Text(e) => {
                if let Some(st) = state.as_mut()
                    && st.in_text
                {
                    push_text(st, &String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::CData(e) => {
                if let Some(st) = state.as_mut()
                    && st.in_text
                {
                    push_text(st, &String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::GeneralRef(e) => {
                if let Some(st) = state.as_mut()
                    && st.in_text
                    && let Some(resolved) = resolve_entity(&String::from_utf8_lossy(e.as_ref()))
                {
                    push_text(st, &resolved);
                }
            }
            Event::End(e) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                if local == b"p"
                    && let Some(st) = state.take()
                {
                    blocks.push(Block::Paragraph(st.paragraph));
                } else if let Some(st) = state.as_mut() {
                    match local {
                        b"r" => {
                            if let Some(run) = st.run.take() {
                                st.paragraph.runs.push(run);
                            }
                        }
                        b"pPr" => st.in_ppr = false,
                        b"rPr" => st.in_rpr = false,
                        b"t" => st.in_text = false,
                        _ => {}
                    }
                } else if local == b"body" {
                    in_body = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(blocks)
}

fn paragraph_start(st: &mut ParagraphState, e: &BytesStart<'_>, local: &[u8]) {
    match local {
        b"pPr" if st.run.is_none() => st.in_ppr = true,
        b"r" if !st.in_ppr => st.run = Some(Run::default()),
        b"rPr" if st.run.is_some() => st.in_rpr = true,
        b"t" if st.run.is_some() && !st.in_rpr => st.in_text = true,
        _ => paragraph_empty(st, e, local),
    }
}

/// Handle a property or content element that carries no text of its own.
fn paragraph_empty(st: &mut ParagraphState, e: &BytesStart<'_>, local: &[u8]) {
    if st.in_ppr {
        match local {
            b"pStyle" => st.paragraph.style = attr_value(e, b"val"),
            b"jc" => {
                st.paragraph.alignment = attr_value(e, b"val").and_then(|v| Alignment::from_val(&v))
            }
            _ => {}
        }
        return;
    }

    let Some(run) = st.run.as_mut() else {
        return;
    };

    if st.in_rpr {
        apply_run_property(&mut run.style, e, local);
        return;
    }

    match local {
        b"tab" => run.content.push(Inline::Tab),
        b"cr" => run.content.push(Inline::Break(BreakKind::Line)),
        b"br" => {
            let kind = match attr_value(e, b"type").as_deref() {
                Some("page") => BreakKind::Page,
                Some("column") => BreakKind::Column,
                _ => BreakKind::Line,
            };
            run.content.push(Inline::Break(kind));
        }
        _ => {}
    }
}

fn apply_run_property(style: &mut RunStyle, e: &BytesStart<'_>, local: &[u8]) {
    match local {
        b"b" => style.bold = toggle_on(e),
        b"i" => style.italic = toggle_on(e),
        b"u" => {
            style.underline = attr_value(e, b"val").filter(|v| v != "none");
        }
        b"rFonts" => {
            style.font = attr_value(e, b"ascii").or_else(|| attr_value(e, b"hAnsi"));
        }
        b"sz" => style.size = attr_value(e, b"val").and_then(|v| v.parse().ok()),
        b"color" => style.color = attr_value(e, b"val").filter(|v| v != "auto"),
        _ => {}
    }
}

/// On/off properties default to on when `w:val` is absent.
fn toggle_on(e: &BytesStart<'_>) -> bool {
    !matches!(
        attr_value(e, b"val").as_deref(),
        Some("0" | "false" | "off" | "none")
    )
}

fn push_text(st: &mut ParagraphState, text: &str) {
    let Some(run) = st.run.as_mut() else {
        return;
    };
    if let Some(Inline::Text(last)) = run.content.last_mut() {
        last.push_str(text);
    } else {
        run.content.push(Inline::Text(text.to_string()));
    }
}

fn opaque_block(xml: &str) -> Result<Block, quick_xml::Error> {
    Ok(Block::Opaque(OpaqueBlock {
        xml: xml.to_string(),
        text: collect_text(xml)?,
    }))
}

/// Concatenate the contents of every `w:t` element in a fragment.
pub(crate) fn collect_text(xml: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut text = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
            Event::Text(e) if in_text => text.push_str(&String::from_utf8_lossy(e.as_ref())),
            Event::GeneralRef(e) if in_text => {
                if let Some(resolved) = resolve_entity(&String::from_utf8_lossy(e.as_ref())) {
                    text.push_str(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
