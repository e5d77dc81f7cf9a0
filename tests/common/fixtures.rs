// Test fixtures for integration testing

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch workspace: a `data/` input directory and an output location
#[allow(dead_code)] // Used in integration tests
pub struct TestDocs {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl TestDocs {
    /// Empty workspace with an existing, empty `data/` directory
    #[allow(dead_code)] // Used in integration tests
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("data")).expect("Failed to create data dir");
        Self {
            dir,
            files: Vec::new(),
        }
    }

    /// Text files under `data/`
    #[allow(dead_code)] // Used in integration tests
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let mut docs = Self::empty();
        for (path, content) in files {
            let full_path = docs.data_dir().join(path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create directories");
            }
            std::fs::write(&full_path, content).expect("Failed to write file");
            docs.files.push(full_path);
        }
        docs
    }

    /// One PDF under `data/`, one page per entry of `pages`
    #[allow(dead_code)] // Used in integration tests
    pub fn with_pdf(name: &str, pages: &[&str]) -> Self {
        let mut docs = Self::empty();
        docs.add_pdf(name, pages);
        docs
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn add_pdf(&mut self, name: &str, pages: &[&str]) -> PathBuf {
        let path = self.data_dir().join(name);
        write_pdf(&path, pages);
        self.files.push(path.clone());
        path
    }

    /// Medical-notes corpus, a few thousand characters per file
    #[allow(dead_code)] // Used in integration tests
    pub fn medical_notes() -> Self {
        let hypertension = "Hypertension is a chronic condition in which the blood \
            pressure in the arteries is persistently elevated. "
            .repeat(20);
        let diabetes = "Diabetes mellitus is a group of metabolic disorders \
            characterized by a high blood sugar level over a prolonged period. "
            .repeat(15);
        let asthma = "Asthma is a long-term inflammatory disease of the airways \
            of the lungs. "
            .repeat(10);

        Self::with_files(&[
            ("hypertension.txt", &hypertension),
            ("diabetes.txt", &diabetes),
            ("asthma.txt", &asthma),
        ])
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn index_dir(&self) -> PathBuf {
        self.dir.path().join("vectorstore").join("db_faiss")
    }
}

/// Write a minimal PDF with one Courier text line per page
///
/// An empty string produces a page with no text.
#[allow(dead_code)] // Used in integration tests
pub fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("Failed to encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).expect("Failed to save PDF");
}
