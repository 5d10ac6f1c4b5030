//! printpdf backend — replays recorded draw ops onto PDF pages.
//!
//! All four theme font families map onto PDF built-in fonts, so no font files
//! are embedded. Recorded coordinates are top-down points; PDF wants
//! bottom-up millimetres, so everything flips through the page height here
//! and nowhere else.

use std::io::{BufWriter, Cursor};

use anyhow::{Context, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, ImageTransform, ImageXObject, IndirectFontRef, Line, Mm,
    PdfDocument, PdfLayerReference, Point, Polygon, Px, Rgb,
};

use crate::text::font_metrics::FontFamily;
use crate::writer::{Color, ComposedDocument, DrawOp};

const PT_TO_MM: f32 = 0.352_777_78;

struct Fonts {
    helvetica: IndirectFontRef,
    helvetica_bold: IndirectFontRef,
    times_roman: IndirectFontRef,
    times_bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, family: FontFamily) -> &IndirectFontRef {
        match family {
            FontFamily::Helvetica => &self.helvetica,
            FontFamily::HelveticaBold => &self.helvetica_bold,
            FontFamily::TimesRoman => &self.times_roman,
            FontFamily::TimesBold => &self.times_bold,
        }
    }
}

/// Serializes a composed document into PDF bytes.
pub(crate) fn write_pdf(doc: &ComposedDocument) -> Result<Vec<u8>> {
    let page_w = Mm(doc.geometry.page_width * PT_TO_MM);
    let page_h_mm = Mm(doc.geometry.page_height * PT_TO_MM);
    let page_h_pt = doc.geometry.page_height;

    let (pdf, first_page, first_layer) = PdfDocument::new("Catalog", page_w, page_h_mm, "Layer 1");

    let fonts = Fonts {
        helvetica: pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .context("registering Helvetica")?,
        helvetica_bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .context("registering Helvetica-Bold")?,
        times_roman: pdf
            .add_builtin_font(BuiltinFont::TimesRoman)
            .context("registering Times-Roman")?,
        times_bold: pdf
            .add_builtin_font(BuiltinFont::TimesBold)
            .context("registering Times-Bold")?,
    };

    for (index, page) in doc.pages.iter().enumerate() {
        let layer = if index == 0 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) = pdf.add_page(page_w, page_h_mm, "Layer 1");
            pdf.get_page(page_ref).get_layer(layer_ref)
        };

        for op in &page.ops {
            draw_op(&layer, &fonts, page_h_pt, op);
        }
    }

    let mut buf = Vec::new();
    {
        let cursor = Cursor::new(&mut buf);
        let mut writer = BufWriter::new(cursor);
        pdf.save(&mut writer).context("serializing PDF")?;
    }
    Ok(buf)
}

fn draw_op(layer: &PdfLayerReference, fonts: &Fonts, page_h: f32, op: &DrawOp) {
    match op {
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            // Flip to bottom-left origin.
            let bottom = page_h - y - height;
            let points = rect_points(*x, bottom, *width, *height);

            if let Some(color) = fill {
                layer.set_fill_color(pdf_color(color));
                let mode = if stroke.is_some() {
                    PaintMode::FillStroke
                } else {
                    PaintMode::Fill
                };
                if let Some((stroke_color, thickness)) = stroke {
                    layer.set_outline_color(pdf_color(stroke_color));
                    layer.set_outline_thickness(*thickness);
                }
                layer.add_polygon(Polygon {
                    rings: vec![points],
                    mode,
                    winding_order: WindingOrder::NonZero,
                });
            } else if let Some((stroke_color, thickness)) = stroke {
                layer.set_outline_color(pdf_color(stroke_color));
                layer.set_outline_thickness(*thickness);
                layer.add_line(Line {
                    points,
                    is_closed: true,
                });
            }
        }

        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            thickness,
        } => {
            layer.set_outline_color(pdf_color(color));
            layer.set_outline_thickness(*thickness);
            let points = vec![
                (pt(*x1, page_h - y1), false),
                (pt(*x2, page_h - y2), false),
            ];
            layer.add_line(Line {
                points,
                is_closed: false,
            });
        }

        DrawOp::Text {
            x,
            y,
            content,
            family,
            size_pt,
            color,
        } => {
            layer.set_fill_color(pdf_color(color));
            layer.use_text(
                content.clone(),
                *size_pt,
                Mm(x * PT_TO_MM),
                Mm((page_h - y) * PT_TO_MM),
                fonts.get(*family),
            );
        }

        DrawOp::Image {
            x,
            y,
            width,
            height,
            image,
        } => {
            if image.width == 0 || image.height == 0 {
                return;
            }
            let xobject = ImageXObject {
                width: Px(image.width as usize),
                height: Px(image.height as usize),
                color_space: ColorSpace::Rgb,
                bits_per_component: ColorBits::Bit8,
                interpolate: true,
                image_data: image.rgb.clone(),
                image_filter: None,
                clipping_bbox: None,
                smask: None,
            };
            let bottom = page_h - y - height;
            // 72 dpi makes 1px == 1pt, so the scale factors land exactly on
            // the reserved slot.
            printpdf::Image::from(xobject).add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(Mm(x * PT_TO_MM)),
                    translate_y: Some(Mm(bottom * PT_TO_MM)),
                    scale_x: Some(width / image.width as f32),
                    scale_y: Some(height / image.height as f32),
                    dpi: Some(72.0),
                    ..Default::default()
                },
            );
        }
    }
}

fn rect_points(x: f32, bottom: f32, w: f32, h: f32) -> Vec<(Point, bool)> {
    vec![
        (pt(x, bottom), false),
        (pt(x + w, bottom), false),
        (pt(x + w, bottom + h), false),
        (pt(x, bottom + h), false),
    ]
}

fn pt(x: f32, y: f32) -> Point {
    Point::new(Mm(x * PT_TO_MM), Mm(y * PT_TO_MM))
}

fn pdf_color(color: &Color) -> printpdf::Color {
    printpdf::Color::Rgb(Rgb::new(color.r, color.g, color.b, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::resolver::DecodedImage;
    use crate::layout::geometry::PageGeometry;
    use crate::writer::{PageOps, RenderSummary};

    fn make_doc(pages: Vec<PageOps>) -> ComposedDocument {
        ComposedDocument::new(PageGeometry::default(), pages, RenderSummary::default())
    }

    #[test]
    fn test_write_pdf_emits_pdf_header() {
        let mut page = PageOps::default();
        page.push(DrawOp::Text {
            x: 40.0,
            y: 60.0,
            content: "Corner Shop".to_string(),
            family: FontFamily::HelveticaBold,
            size_pt: 16.0,
            color: Color::BLACK,
        });
        page.push(DrawOp::Rect {
            x: 40.0,
            y: 80.0,
            width: 200.0,
            height: 20.0,
            fill: Some(Color::rgb(0.9, 0.9, 0.9)),
            stroke: None,
        });
        let bytes = write_pdf(&make_doc(vec![page])).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_write_pdf_multiple_pages() {
        let mut first = PageOps::default();
        first.push(DrawOp::Line {
            x1: 0.0,
            y1: 10.0,
            x2: 100.0,
            y2: 10.0,
            color: Color::BLACK,
            thickness: 0.75,
        });
        let second = PageOps::default();
        let bytes = write_pdf(&make_doc(vec![first, second])).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_pdf_with_raster_image() {
        let image = DecodedImage {
            width: 2,
            height: 2,
            rgb: vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 128, 128, 128],
        };
        let mut page = PageOps::default();
        page.push(DrawOp::Image {
            x: 50.0,
            y: 50.0,
            width: 40.0,
            height: 40.0,
            image,
        });
        let bytes = write_pdf(&make_doc(vec![page])).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
