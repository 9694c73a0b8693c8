//! page::sink
//!
//! Single-region pages backed by a byte sink or a file.
//!
//! The CLI has no document to mutate; it renders the one display region it
//! knows about to stdout or to a file. Writes addressed to any other element
//! id fail with `ElementNotFound`.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::traits::{Page, PageError};

/// A page with one region whose content is emitted to a writer.
///
/// Each replacement writes the markup exactly as received and flushes. A
/// stream cannot be rewound, so a later replacement follows the earlier one
/// in the output.
pub struct WriterPage<W: Write + Send> {
    /// Element id this page answers to
    id: String,
    /// Output sink
    out: Mutex<W>,
}

impl<W: Write + Send> WriterPage<W> {
    /// Create a page exposing `id` and writing to `out`.
    pub fn new(id: impl Into<String>, out: W) -> Self {
        Self {
            id: id.into(),
            out: Mutex::new(out),
        }
    }

    /// Consume the page and return its sink.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> std::fmt::Debug for WriterPage<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterPage").field("id", &self.id).finish()
    }
}

impl<W: Write + Send> Page for WriterPage<W> {
    fn replace_content(&self, element_id: &str, markup: &str) -> Result<(), PageError> {
        if element_id != self.id {
            return Err(PageError::ElementNotFound(element_id.to_string()));
        }
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        out.write_all(markup.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| PageError::Io {
                id: element_id.to_string(),
                source: e,
            })
    }
}

/// A page with one region stored as a file.
///
/// Each replacement rewrites the whole file (temp file, then rename), so
/// the file always holds exactly the last applied markup. The temp file is
/// named after the full destination name (`report.html.tmp`), so siblings
/// sharing the stem are never touched.
#[derive(Debug)]
pub struct FilePage {
    /// Element id this page answers to
    id: String,
    /// Destination file
    path: PathBuf,
    /// Serializes writers sharing the temp path
    lock: Mutex<()>,
}

impl FilePage {
    /// Create a page exposing `id` and storing it at `path`.
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Destination file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Temp file used while replacing the destination.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("page"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_atomic(&self, markup: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp_path = self.temp_path();
        fs::write(&temp_path, markup)?;
        fs::rename(&temp_path, &self.path)
    }
}

impl Page for FilePage {
    fn replace_content(&self, element_id: &str, markup: &str) -> Result<(), PageError> {
        if element_id != self.id {
            return Err(PageError::ElementNotFound(element_id.to_string()));
        }
        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.write_atomic(markup).map_err(|e| PageError::Io {
            id: element_id.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_page_emits_markup() {
        let page = WriterPage::new("changesets", Vec::new());
        page.replace_content("changesets", "<div>X</div>").unwrap();

        let out = page.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "<div>X</div>");
    }

    #[test]
    fn writer_page_rejects_other_ids() {
        let page = WriterPage::new("changesets", Vec::new());
        let err = page.replace_content("sidebar", "x").unwrap_err();

        assert!(matches!(err, PageError::ElementNotFound(ref id) if id == "sidebar"));
        assert!(page.into_inner().is_empty());
    }

    #[test]
    fn file_page_keeps_only_last_markup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/changesets.html");
        let page = FilePage::new("changesets", &path);

        page.replace_content("changesets", "<p>first, longer content</p>")
            .unwrap();
        page.replace_content("changesets", "<p>b</p>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>b</p>");
        assert!(!page.temp_path().exists());
    }

    #[test]
    fn writer_page_appends_successive_markup_verbatim() {
        let page = WriterPage::new("changesets", Vec::new());
        page.replace_content("changesets", "<p>a</p>").unwrap();
        page.replace_content("changesets", "<p>b</p>").unwrap();

        let out = page.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "<p>a</p><p>b</p>");
    }

    #[test]
    fn file_page_temp_name_keeps_full_file_name() {
        let page = FilePage::new("changesets", "out/report.html");
        assert_eq!(page.temp_path(), Path::new("out/report.html.tmp"));
    }

    #[test]
    fn file_page_leaves_sibling_tmp_alone() {
        let dir = tempfile::tempdir().unwrap();
        let sibling = dir.path().join("report.tmp");
        fs::write(&sibling, "user data").unwrap();
        let page = FilePage::new("changesets", dir.path().join("report.html"));

        page.replace_content("changesets", "<p>7</p>").unwrap();

        assert_eq!(fs::read_to_string(&sibling).unwrap(), "user data");
        assert_eq!(fs::read_to_string(page.path()).unwrap(), "<p>7</p>");
    }

    #[test]
    fn file_page_rejects_other_ids() {
        let dir = tempfile::tempdir().unwrap();
        let page = FilePage::new("changesets", dir.path().join("x.html"));

        assert!(page.replace_content("other", "x").is_err());
        assert!(!page.path().exists());
    }
}
