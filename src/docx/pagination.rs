//! Pagination reset for merged documents.
//!
//! Rewrites every `w:sectPr` in a main document part so that page numbering
//! starts at 1 and footnote/endnote numbering restarts each section. Merged
//! content therefore never inherits a page offset from the source it was
//! cloned out of.

use std::io;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use super::xml::{io_error, local_name};

/// `w:sectPr` children that must come after `w:pgNumType` (schema order).
const AFTER_PG_NUM_TYPE: &[&[u8]] = &[
    b"cols",
    b"formProt",
    b"vAlign",
    b"noEndnote",
    b"titlePg",
    b"textDirection",
    b"bidi",
    b"rtlGutter",
    b"docGrid",
    b"printerSettings",
    b"sectPrChange",
];

/// Progress through one open `w:sectPr`.
#[derive(Default)]
struct SectState {
    /// Element depth inside the sectPr; direct children are at depth 1.
    depth: usize,
    notes_written: bool,
    page_numbering_written: bool,
}

/// Apply the pagination reset to a main document part.
pub fn reset_pagination(xml: &str) -> io::Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + 256));
    let mut stack: Vec<SectState> = Vec::new();

    loop {
        let event = reader.read_event().map_err(io_error)?;
        match event {
            Event::Start(e) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                if local == b"sectPr" {
                    if let Some(sect) = stack.last_mut() {
                        before_child(&mut writer, sect, local)?;
                        sect.depth += 1;
                    }
                    writer.write_event(Event::Start(e)).map_err(io_error)?;
                    stack.push(SectState::default());
                    continue;
                }

                match stack.last_mut() {
                    Some(sect) if sect.depth == 0 => {
                        if matches!(local, b"footnotePr" | b"endnotePr") {
                            before_child(&mut writer, sect, local)?;
                            reader.read_to_end(name).map_err(io_error)?;
                            continue;
                        }
                        if local == b"pgNumType" {
                            before_child(&mut writer, sect, local)?;
                            reader.read_to_end(name).map_err(io_error)?;
                            write_page_numbering(&mut writer, Some(&e))?;
                            sect.page_numbering_written = true;
                            continue;
                        }
                        before_child(&mut writer, sect, local)?;
                        sect.depth += 1;
                        writer.write_event(Event::Start(e)).map_err(io_error)?;
                    }
                    Some(sect) => {
                        sect.depth += 1;
                        writer.write_event(Event::Start(e)).map_err(io_error)?;
                    }
                    None => writer.write_event(Event::Start(e)).map_err(io_error)?,
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                if local == b"sectPr" {
                    if let Some(sect) = stack.last_mut() {
                        before_child(&mut writer, sect, local)?;
                    }
                    // Expand `<w:sectPr/>` so the reset fields have somewhere to live.
                    let tag = String::from_utf8_lossy(name.as_ref()).into_owned();
                    writer.write_event(Event::Start(e.clone())).map_err(io_error)?;
                    let mut sect = SectState::default();
                    finish_section(&mut writer, &mut sect)?;
                    writer
                        .write_event(Event::End(BytesEnd::new(tag)))
                        .map_err(io_error)?;
                    continue;
                }

                match stack.last_mut() {
                    Some(sect) if sect.depth == 0 => {
                        before_child(&mut writer, sect, local)?;
                        match local {
                            b"footnotePr" | b"endnotePr" => {}
                            b"pgNumType" => {
                                write_page_numbering(&mut writer, Some(&e))?;
                                sect.page_numbering_written = true;
                            }
                            _ => writer.write_event(Event::Empty(e)).map_err(io_error)?,
                        }
                    }
                    _ => writer.write_event(Event::Empty(e)).map_err(io_error)?,
                }
            }
            Event::End(e) => {
                let is_sect = local_name(e.name().as_ref()) == b"sectPr";
                match stack.last_mut() {
                    Some(sect) if is_sect && sect.depth == 0 => {
                        finish_section(&mut writer, sect)?;
                        stack.pop();
                        if let Some(parent) = stack.last_mut() {
                            parent.depth -= 1;
                        }
                    }
                    Some(sect) => sect.depth = sect.depth.saturating_sub(1),
                    None => {}
                }
                writer.write_event(Event::End(e)).map_err(io_error)?;
            }
            Event::Eof => break,
            other => writer.write_event(other).map_err(io_error)?,
        }
    }

    String::from_utf8(writer.into_inner()).map_err(io_error)
}

/// Emit whatever must precede a direct child of the current section.
fn before_child<W: io::Write>(
    writer: &mut Writer<W>,
    sect: &mut SectState,
    local: &[u8],
) -> io::Result<()> {
    if matches!(local, b"headerReference" | b"footerReference") {
        return Ok(());
    }
    if !sect.notes_written {
        write_note_restart(writer)?;
        sect.notes_written = true;
    }
    if !sect.page_numbering_written && AFTER_PG_NUM_TYPE.contains(&local) {
        write_page_numbering(writer, None)?;
        sect.page_numbering_written = true;
    }
    Ok(())
}

fn finish_section<W: io::Write>(writer: &mut Writer<W>, sect: &mut SectState) -> io::Result<()> {
    if !sect.notes_written {
        write_note_restart(writer)?;
        sect.notes_written = true;
    }
    if !sect.page_numbering_written {
        write_page_numbering(writer, None)?;
        sect.page_numbering_written = true;
    }
    Ok(())
}

fn write_note_restart<W: io::Write>(writer: &mut Writer<W>) -> io::Result<()> {
    for props in ["w:footnotePr", "w:endnotePr"] {
        writer
            .write_event(Event::Start(BytesStart::new(props)))
            .map_err(io_error)?;
        let mut restart = BytesStart::new("w:numRestart");
        restart.push_attribute(("w:val", "eachSect"));
        writer.write_event(Event::Empty(restart)).map_err(io_error)?;
        writer
            .write_event(Event::End(BytesEnd::new(props)))
            .map_err(io_error)?;
    }
    Ok(())
}

/// Write `w:pgNumType` with `w:start="1"`, keeping any other attributes
/// (number format, chapter style) of an existing element.
fn write_page_numbering<W: io::Write>(
    writer: &mut Writer<W>,
    existing: Option<&BytesStart<'_>>,
) -> io::Result<()> {
    let mut elem = BytesStart::new("w:pgNumType");
    if let Some(existing) = existing {
        for attr in existing.attributes().flatten() {
            if local_name(attr.key.as_ref()) != b"start" {
                elem.push_attribute(attr);
            }
        }
    }
    elem.push_attribute(("w:start", "1"));
    writer.write_event(Event::Empty(elem)).map_err(io_error)
}
