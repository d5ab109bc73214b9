//! Minimal PDF 1.4 writer for laid-out pages
//!
//! Emits uncompressed content streams using the standard Helvetica fonts
//! with WinAnsi encoding, so no font embedding is needed.

use super::layout::{DrawOp, Font, Page, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PT_PER_MM};
use crate::error::{EconomicsError, Result};
use chrono::{DateTime, Local};
use std::io::Write;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const INFO_ID: usize = 3;
const FIRST_FONT_ID: usize = 4;

/// Document metadata written to the Info dictionary
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub created: DateTime<Local>,
}

/// Serialize pages into a complete PDF file
pub fn write_pdf(pages: &[Page], info: &DocumentInfo) -> Result<Vec<u8>> {
    if pages.is_empty() {
        return Err(EconomicsError::Rendering("document has no pages".to_string()));
    }

    let mut writer = PdfWriter::new();
    writer.buf.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")?;

    let first_page_id = FIRST_FONT_ID + Font::ALL.len();
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| first_page_id + 2 * i).collect();

    writer.object(CATALOG_ID, format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID).as_bytes())?;

    let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
    writer.object(
        PAGES_ID,
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()).as_bytes(),
    )?;

    let mut info_dict = b"<< /Title ".to_vec();
    info_dict.extend(pdf_string(&info.title));
    info_dict.extend(b" /Producer (project_economics) /CreationDate ");
    info_dict.extend(pdf_string(&info.created.format("D:%Y%m%d%H%M%S").to_string()));
    info_dict.extend(b" >>");
    writer.object(INFO_ID, &info_dict)?;

    for (i, font) in Font::ALL.iter().enumerate() {
        writer.object(
            FIRST_FONT_ID + i,
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.base_font()
            )
            .as_bytes(),
        )?;
    }

    let font_resources: Vec<String> = Font::ALL
        .iter()
        .enumerate()
        .map(|(i, font)| format!("/{} {} 0 R", font.resource_name(), FIRST_FONT_ID + i))
        .collect();
    let font_resources = font_resources.join(" ");

    for (page, &page_id) in pages.iter().zip(&page_ids) {
        let contents_id = page_id + 1;
        writer.object(
            page_id,
            format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {:.2} {:.2}] /Resources << /Font << {} >> >> /Contents {} 0 R >>",
                PAGES_ID,
                PAGE_WIDTH_MM * PT_PER_MM,
                PAGE_HEIGHT_MM * PT_PER_MM,
                font_resources,
                contents_id
            )
            .as_bytes(),
        )?;
        writer.stream(contents_id, &content_stream(page)?)?;
    }

    writer.finish()
}

struct PdfWriter {
    buf: Vec<u8>,
    /// Byte offset of each object, indexed by id - 1
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        Self {
            buf: Vec::new(),
            offsets: Vec::new(),
        }
    }

    fn begin(&mut self, id: usize) -> Result<()> {
        if self.offsets.len() < id {
            self.offsets.resize(id, 0);
        }
        self.offsets[id - 1] = self.buf.len();
        writeln!(self.buf, "{} 0 obj", id)?;
        Ok(())
    }

    fn object(&mut self, id: usize, body: &[u8]) -> Result<()> {
        self.begin(id)?;
        self.buf.write_all(body)?;
        self.buf.write_all(b"\nendobj\n")?;
        Ok(())
    }

    fn stream(&mut self, id: usize, data: &[u8]) -> Result<()> {
        self.begin(id)?;
        write!(self.buf, "<< /Length {} >>\nstream\n", data.len())?;
        self.buf.write_all(data)?;
        self.buf.write_all(b"\nendstream\nendobj\n")?;
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        if let Some(missing) = self.offsets.iter().position(|&offset| offset == 0) {
            return Err(EconomicsError::Rendering(format!("object {} was never written", missing + 1)));
        }

        let xref_offset = self.buf.len();
        let size = self.offsets.len() + 1;
        write!(self.buf, "xref\n0 {}\n0000000000 65535 f \n", size)?;
        for offset in &self.offsets {
            writeln!(self.buf, "{:010} 00000 n ", offset)?;
        }
        write!(
            self.buf,
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, CATALOG_ID, INFO_ID, xref_offset
        )?;
        Ok(self.buf)
    }
}

fn content_stream(page: &Page) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    // 0.2mm lines
    writeln!(out, "{:.2} w", 0.2 * PT_PER_MM)?;

    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, font, size, text } => {
                write!(
                    out,
                    "BT /{} {:.2} Tf {:.2} {:.2} Td ",
                    font.resource_name(),
                    size,
                    x * PT_PER_MM,
                    (PAGE_HEIGHT_MM - y) * PT_PER_MM
                )?;
                out.extend(pdf_string(text));
                out.write_all(b" Tj ET\n")?;
            }
            DrawOp::Rect { x, y, width, height } => {
                writeln!(
                    out,
                    "{:.2} {:.2} {:.2} {:.2} re S",
                    x * PT_PER_MM,
                    (PAGE_HEIGHT_MM - y) * PT_PER_MM,
                    width * PT_PER_MM,
                    -height * PT_PER_MM
                )?;
            }
        }
    }
    Ok(out)
}

/// Encode text as a PDF literal string in WinAnsi encoding.
/// Characters outside Latin-1 (other than the euro sign) become '?'.
fn pdf_string(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'(');
    for c in text.chars() {
        let byte = match c {
            '€' => 0x80,
            '(' | ')' | '\\' => {
                out.push(b'\\');
                c as u8
            }
            c if (c as u32) < 0x20 => b' ',
            c if (c as u32) <= 0xFF => c as u32 as u8,
            _ => b'?',
        };
        out.push(byte);
    }
    out.push(b')');
    out
}
