//! page::memory
//!
//! In-memory page holding a fixed set of elements.
//!
//! # Design
//!
//! Elements are registered up front; replacing the content of an element
//! that was never registered fails with `ElementNotFound`, the same way a
//! lookup by id fails on a real document. Every successful write bumps a
//! counter that callers can await, which is how tests observe that a
//! completion has been applied.
//!
//! # Example
//!
//! ```
//! use changeset_loader::page::{MemoryPage, Page};
//!
//! let page = MemoryPage::new().with_element("changesets", "loading...");
//! page.replace_content("changesets", "<div>X</div>").unwrap();
//! assert_eq!(page.content("changesets").as_deref(), Some("<div>X</div>"));
//! assert!(page.replace_content("sidebar", "x").is_err());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use super::traits::{Page, PageError};

/// In-memory page.
///
/// Clones share the same elements.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    /// Element contents by id.
    elements: Arc<Mutex<HashMap<String, String>>>,
    /// Number of successful writes so far.
    writes: Arc<watch::Sender<usize>>,
}

impl MemoryPage {
    /// Create a page with no elements.
    pub fn new() -> Self {
        let (writes, _rx) = watch::channel(0);
        Self {
            elements: Arc::new(Mutex::new(HashMap::new())),
            writes: Arc::new(writes),
        }
    }

    /// Register an element with initial content.
    pub fn with_element(self, id: impl Into<String>, initial: impl Into<String>) -> Self {
        {
            let mut elements = self.elements.lock().unwrap();
            elements.insert(id.into(), initial.into());
        }
        self
    }

    /// Current content of an element, if it exists.
    pub fn content(&self, id: &str) -> Option<String> {
        let elements = self.elements.lock().unwrap();
        elements.get(id).cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    /// Wait until at least `count` writes have been applied.
    pub async fn wait_for_writes(&self, count: usize) {
        let mut rx = self.writes.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|n| *n >= count).await;
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for MemoryPage {
    fn replace_content(&self, element_id: &str, markup: &str) -> Result<(), PageError> {
        {
            let mut elements = self.elements.lock().unwrap();
            let slot = elements
                .get_mut(element_id)
                .ok_or_else(|| PageError::ElementNotFound(element_id.to_string()))?;
            *slot = markup.to_string();
        }
        self.writes.send_modify(|n| *n += 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_overwrites_previous_content() {
        let page = MemoryPage::new().with_element("changesets", "<p>old</p>");

        page.replace_content("changesets", "<p>new</p>").unwrap();

        assert_eq!(page.content("changesets").as_deref(), Some("<p>new</p>"));
        assert_eq!(page.write_count(), 1);
    }

    #[test]
    fn missing_element_is_an_error_and_not_counted() {
        let page = MemoryPage::new();

        let err = page.replace_content("changesets", "x").unwrap_err();

        assert!(matches!(err, PageError::ElementNotFound(ref id) if id == "changesets"));
        assert_eq!(page.write_count(), 0);
        assert!(page.content("changesets").is_none());
    }

    #[test]
    fn clones_share_elements() {
        let page = MemoryPage::new().with_element("changesets", "");
        let clone = page.clone();

        clone.replace_content("changesets", "shared").unwrap();

        assert_eq!(page.content("changesets").as_deref(), Some("shared"));
        assert_eq!(page.write_count(), 1);
    }

    #[tokio::test]
    async fn wait_for_writes_returns_once_reached() {
        let page = MemoryPage::new().with_element("changesets", "");
        let writer = page.clone();

        let task = tokio::spawn(async move {
            writer.replace_content("changesets", "a").unwrap();
            writer.replace_content("changesets", "b").unwrap();
        });

        page.wait_for_writes(2).await;
        task.await.unwrap();
        assert_eq!(page.content("changesets").as_deref(), Some("b"));
    }
}
