use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

use crate::types::{Item, Status};

/// Compiled search query.
///
/// A query matches an item when its trimmed, case-folded form is a substring
/// of the item's text, start day or end day. A blank query matches everything.
#[derive(Debug, Clone)]
pub struct ItemFilter {
    needle: Option<String>,
}

impl ItemFilter {
    pub fn compile(raw_query: &str) -> Self {
        let query = raw_query.trim();
        if query.is_empty() {
            return Self { needle: None };
        }
        Self {
            needle: Some(normalize_for_search(query)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches(&self, item: &Item) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        [&item.text, &item.start_day, &item.end_day]
            .into_iter()
            .any(|field| normalize_for_search(field).contains(needle.as_str()))
    }
}

/// Items matching `query`, in input order. A blank query returns every item.
pub fn filter_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let filter = ItemFilter::compile(query);
    if filter.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Stable partition by status. Statuses without items have no entry.
pub fn group_by_status<'a, I>(items: I) -> HashMap<Status, Vec<&'a Item>>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut groups: HashMap<Status, Vec<&'a Item>> = HashMap::new();
    for item in items {
        groups.entry(item.status).or_default().push(item);
    }
    groups
}

/// Lowercase and NFC-compose so precomposed and combining forms compare equal.
fn normalize_for_search(value: &str) -> String {
    value.nfc().collect::<String>().to_lowercase()
}
