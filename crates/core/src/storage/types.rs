use crate::item::Item;

/// One batch of items returned by a scan request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Item>,
    /// Key to resume the scan from; `None` on the final page.
    pub last_evaluated_key: Option<Item>,
}

impl Page {
    /// Creates a page, treating an empty cursor as no cursor.
    pub fn new(items: Vec<Item>, last_evaluated_key: Option<Item>) -> Self {
        Self {
            items,
            last_evaluated_key: last_evaluated_key.filter(|key| !key.is_empty()),
        }
    }

    /// Whether the store has no further pages after this one.
    pub fn is_last(&self) -> bool {
        self.last_evaluated_key.is_none()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
