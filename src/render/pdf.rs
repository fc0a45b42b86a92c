use std::path::{Path, PathBuf};

use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::engine::CardImage;
use crate::error::SheetError;
use crate::infra::config::{mm_to_pt, SheetConfig};
use crate::layout::Placement;
use crate::render::{cut_mark_segments, SheetWriter};

const TITLE: &str = "Magic: The Gathering cards";
const AUTHOR: &str = "card-sheet";
const SUBJECT: &str = "Printable card sheets";

#[derive(Default)]
struct OpenPage {
    operations: Vec<Operation>,
    images: Dictionary,
    image_count: usize,
}

/// Builds the sheet as a PDF document with `lopdf`; nothing touches the disk
/// until [`SheetWriter::finish`].
pub struct PdfSheetWriter {
    output: PathBuf,
    config: SheetConfig,
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    current: Option<OpenPage>,
}

impl PdfSheetWriter {
    pub fn new(output: &Path, config: &SheetConfig) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            output: output.to_path_buf(),
            config: config.clone(),
            doc,
            pages_id,
            page_ids: Vec::new(),
            current: None,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn open_page(&mut self) -> Result<&mut OpenPage, SheetError> {
        self.current
            .as_mut()
            .ok_or_else(|| SheetError::Render("no page is open".to_string()))
    }
}

impl SheetWriter for PdfSheetWriter {
    fn begin_page(&mut self, page_number: usize) -> Result<(), SheetError> {
        if self.current.is_some() {
            return Err(SheetError::Render(format!(
                "page {page_number} started before the previous page was finished"
            )));
        }
        self.current = Some(OpenPage::default());
        Ok(())
    }

    fn draw_card(&mut self, card: &CardImage, placement: &Placement) -> Result<(), SheetError> {
        self.open_page()?;
        let mut image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(card.width()),
                "Height" => i64::from(card.height()),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
            },
            card.pixels.as_raw().clone(),
        );
        image.compress().map_err(|error| {
            SheetError::Render(format!("failed to compress {:?}: {error}", card.source))
        })?;
        let image_id = self.doc.add_object(image);

        let page = self.open_page()?;
        page.image_count += 1;
        let name = format!("Im{}", page.image_count);
        page.images.set(name.as_bytes().to_vec(), Object::Reference(image_id));

        page.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    real(mm_to_pt(placement.width_mm)),
                    real(0.0),
                    real(0.0),
                    real(mm_to_pt(placement.height_mm)),
                    real(mm_to_pt(placement.x_mm)),
                    real(mm_to_pt(placement.y_mm)),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.into_bytes())]),
            Operation::new("Q", vec![]),
        ]);
        Ok(())
    }

    fn draw_cut_marks(&mut self, placement: &Placement) -> Result<(), SheetError> {
        let [r, g, b] = self.config.cut_mark_color;
        let width = self.config.cut_mark_width_pt;
        let segments = cut_mark_segments(placement, self.config.cut_mark_length_mm);

        let page = self.open_page()?;
        page.operations.push(Operation::new("q", vec![]));
        page.operations.push(Operation::new("w", vec![real(width)]));
        page.operations
            .push(Operation::new("RG", vec![real(r), real(g), real(b)]));
        for segment in segments {
            page.operations.push(Operation::new(
                "m",
                vec![real(mm_to_pt(segment.from.0)), real(mm_to_pt(segment.from.1))],
            ));
            page.operations.push(Operation::new(
                "l",
                vec![real(mm_to_pt(segment.to.0)), real(mm_to_pt(segment.to.1))],
            ));
        }
        page.operations.push(Operation::new("S", vec![]));
        page.operations.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn finish_page(&mut self) -> Result<(), SheetError> {
        let page = self
            .current
            .take()
            .ok_or_else(|| SheetError::Render("no page is open".to_string()))?;

        let content = Content {
            operations: page.operations,
        }
        .encode()
        .map_err(|error| SheetError::Render(format!("failed to encode page content: {error}")))?;
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, content));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                real(0.0),
                real(0.0),
                real(mm_to_pt(self.config.page_width_mm)),
                real(mm_to_pt(self.config.page_height_mm)),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => page.images,
            },
        });
        self.page_ids.push(page_id);
        debug!("finished page {} ({} images)", self.page_ids.len(), page.image_count);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SheetError> {
        if self.current.is_some() {
            self.finish_page()?;
        }

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.page_ids.len() as i64,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let info_id = self.doc.add_object(dictionary! {
            "Title" => Object::string_literal(TITLE),
            "Author" => Object::string_literal(AUTHOR),
            "Subject" => Object::string_literal(SUBJECT),
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);

        self.doc.compress();
        self.doc.save(&self.output).map_err(|error| {
            SheetError::Io(format!("failed to write {:?}: {error}", self.output))
        })?;
        Ok(())
    }
}

fn real(value: f64) -> Object {
    Object::Real((value as f32).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridLayout;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn card(width: u32, height: u32) -> CardImage {
        CardImage {
            source: PathBuf::from("card.png"),
            pixels: RgbImage::from_pixel(width, height, Rgb([40_u8, 80_u8, 120_u8])),
        }
    }

    #[test]
    fn writes_one_pdf_page_per_finished_page() {
        let dir = TempDir::new().expect("tempdir");
        let output = dir.path().join("sheet.pdf");
        let config = SheetConfig::default();
        let layout = GridLayout::compute(&config).expect("layout");

        let mut writer = PdfSheetWriter::new(&output, &config);
        for page_number in 1..=2 {
            writer.begin_page(page_number).expect("begin");
            let placement = layout.slot_position(0, 0);
            writer.draw_card(&card(8, 11), &placement).expect("card");
            writer.draw_cut_marks(&placement).expect("marks");
            writer.finish_page().expect("finish page");
        }
        assert_eq!(writer.page_count(), 2);
        writer.finish().expect("finish");

        let doc = Document::load(&output).expect("pdf should load");
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn page_content_places_the_image_in_points() {
        let dir = TempDir::new().expect("tempdir");
        let output = dir.path().join("sheet.pdf");
        let config = SheetConfig::default();
        let layout = GridLayout::compute(&config).expect("layout");

        let mut writer = PdfSheetWriter::new(&output, &config);
        writer.begin_page(1).expect("begin");
        writer
            .draw_card(&card(4, 4), &layout.slot_position(0, 0))
            .expect("card");
        writer.finish().expect("finish");

        let doc = Document::load(&output).expect("pdf should load");
        let (_, page_id) = doc.get_pages().into_iter().next().expect("one page");
        let data = doc.get_page_content(page_id).expect("content");
        let content = Content::decode(&data).expect("decodable content");
        let cm = content
            .operations
            .iter()
            .find(|operation| operation.operator == "cm")
            .expect("image transform");
        let x = cm.operands[4].as_float().expect("x");
        assert!((f64::from(x) - mm_to_pt(9.5)).abs() < 0.01);
        assert!(content
            .operations
            .iter()
            .any(|operation| operation.operator == "Do"));
    }

    #[test]
    fn card_images_are_compressed_as_they_are_added() {
        let dir = TempDir::new().expect("tempdir");
        let config = SheetConfig::default();
        let layout = GridLayout::compute(&config).expect("layout");
        let mut writer = PdfSheetWriter::new(&dir.path().join("x.pdf"), &config);

        writer.begin_page(1).expect("begin");
        writer
            .draw_card(&card(40, 40), &layout.slot_position(0, 0))
            .expect("card");

        let page = writer.current.as_ref().expect("open page");
        let image_id = page
            .images
            .get(b"Im1")
            .and_then(Object::as_reference)
            .expect("image reference");
        let stream = writer
            .doc
            .get_object(image_id)
            .and_then(Object::as_stream)
            .expect("image stream");
        let filter = stream.dict.get(b"Filter").expect("filter before finish");
        assert_eq!(filter.as_name().expect("name"), b"FlateDecode");
        assert!(stream.content.len() < 40 * 40 * 3);
    }

    #[test]
    fn drawing_without_an_open_page_fails() {
        let dir = TempDir::new().expect("tempdir");
        let config = SheetConfig::default();
        let layout = GridLayout::compute(&config).expect("layout");
        let mut writer = PdfSheetWriter::new(&dir.path().join("x.pdf"), &config);

        assert!(matches!(
            writer.draw_cut_marks(&layout.slot_position(0, 0)),
            Err(SheetError::Render(_))
        ));
        assert!(matches!(writer.finish_page(), Err(SheetError::Render(_))));
    }

    #[test]
    fn unwritable_output_is_an_io_error() {
        let dir = TempDir::new().expect("tempdir");
        let output = dir.path().join("missing").join("sheet.pdf");
        let mut writer = PdfSheetWriter::new(&output, &SheetConfig::default());
        writer.begin_page(1).expect("begin");
        writer.finish_page().expect("finish page");
        assert!(matches!(writer.finish(), Err(SheetError::Io(_))));
    }
}
