//! Page layout primitives: a cursor-based canvas of fixed-height cells
//!
//! Coordinates are millimetres from the top-left corner of an A4 portrait
//! page. Text positions are baselines.

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
pub const MARGIN_MM: f64 = 10.0;
/// Rows that would end below this line start a new page
pub const BOTTOM_MARGIN_MM: f64 = 20.0;
/// Horizontal padding between a cell edge and its text
const CELL_PADDING_MM: f64 = 1.0;
/// Points per millimetre
pub const PT_PER_MM: f64 = 72.0 / 25.4;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Standard PDF base fonts used by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    pub const ALL: [Font; 2] = [Font::Regular, Font::Bold];

    /// Resource name referenced from content streams
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Advance width in 1/1000 em
    fn char_width(&self, c: char) -> u16 {
        let table = match self {
            Font::Regular => &HELVETICA_WIDTHS,
            Font::Bold => &HELVETICA_BOLD_WIDTHS,
        };
        let code = c as u32;
        if (32..127).contains(&code) {
            table[(code - 32) as usize]
        } else {
            556
        }
    }

    /// Rendered width of `text` in millimetres
    pub fn text_width_mm(&self, text: &str, size_pt: f64) -> f64 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f64 * size_pt / 1000.0 / PT_PER_MM
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        text: String,
    },
    /// Stroked rectangle outline
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// All text on the page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rect { .. } => None,
        })
    }
}

/// Cell options for [`Canvas::cell`]
#[derive(Debug, Clone, Copy)]
pub struct CellStyle {
    pub border: bool,
    pub align: Align,
    /// Move to the start of the next line after this cell
    pub line_break: bool,
}

impl CellStyle {
    pub const INLINE: CellStyle = CellStyle {
        border: false,
        align: Align::Left,
        line_break: false,
    };
    pub const LINE: CellStyle = CellStyle {
        border: false,
        align: Align::Left,
        line_break: true,
    };

    pub fn aligned(self, align: Align) -> Self {
        Self { align, ..self }
    }

    pub fn bordered(self) -> Self {
        Self { border: true, ..self }
    }
}

/// Cursor-based page builder with automatic page breaks
#[derive(Debug)]
pub struct Canvas {
    pages: Vec<Page>,
    x: f64,
    y: f64,
    font: Font,
    size: f64,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            x: MARGIN_MM,
            y: MARGIN_MM,
            font: Font::Regular,
            size: 10.0,
        }
    }

    pub fn set_font(&mut self, font: Font, size: f64) {
        self.font = font;
        self.size = size;
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_page(&mut self) -> &mut Page {
        // Canvas always holds at least one page
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.y = MARGIN_MM;
    }

    /// Draw one cell at the cursor and advance it
    pub fn cell(&mut self, width: f64, height: f64, text: &str, style: CellStyle) {
        if self.y + height > PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM {
            let x = self.x;
            self.add_page();
            self.x = x;
        }

        let (x, y) = (self.x, self.y);
        if style.border {
            self.current_page().ops.push(DrawOp::Rect { x, y, width, height });
        }

        if !text.is_empty() {
            let text_width = self.font.text_width_mm(text, self.size);
            let text_x = match style.align {
                Align::Left => x + CELL_PADDING_MM,
                Align::Center => x + (width - text_width) / 2.0,
                Align::Right => x + width - CELL_PADDING_MM - text_width,
            };
            let baseline = y + 0.5 * height + 0.3 * self.size / PT_PER_MM;
            let (font, size) = (self.font, self.size);
            self.current_page().ops.push(DrawOp::Text {
                x: text_x,
                y: baseline,
                font,
                size,
                text: text.to_string(),
            });
        }

        if style.line_break {
            self.x = MARGIN_MM;
            self.y += height;
        } else {
            self.x += width;
        }
    }

    /// Move to the next line with extra vertical space
    pub fn ln(&mut self, height: f64) {
        self.x = MARGIN_MM;
        self.y += height;
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
