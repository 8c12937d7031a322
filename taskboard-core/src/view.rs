/// Read-only board layout derived from the canonical list.
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::expiry::is_expired_at;
use crate::search::{filter_items, group_by_status};
use crate::types::{Item, ItemId, Status};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView<'a> {
    #[serde(flatten)]
    pub item: &'a Item,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub expired: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView<'a> {
    pub status: Status,
    pub label: &'static str,
    pub cards: Vec<CardView<'a>>,
}

impl ColumnView<'_> {
    pub fn card_ids(&self) -> Vec<ItemId> {
        self.cards.iter().map(|card| card.item.id).collect()
    }
}

/// The four fixed columns in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView<'a> {
    pub query: String,
    pub columns: Vec<ColumnView<'a>>,
}

impl<'a> BoardView<'a> {
    pub fn build(items: &'a [Item], query: &str) -> Self {
        Self::build_at(items, query, Local::now().naive_local())
    }

    /// Build with an explicit clock for the expiry flags.
    pub fn build_at(items: &'a [Item], query: &str, now: NaiveDateTime) -> Self {
        let mut groups = group_by_status(filter_items(items, query));
        let columns = Status::ALL
            .into_iter()
            .map(|status| ColumnView {
                status,
                label: status.label(),
                cards: groups
                    .remove(&status)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|item| CardView {
                        item,
                        expired: is_expired_at(item, now),
                    })
                    .collect(),
            })
            .collect();
        Self {
            query: query.trim().to_string(),
            columns,
        }
    }

    pub fn column(&self, status: Status) -> &ColumnView<'a> {
        // Columns are built from Status::ALL, whose order matches the enum.
        &self.columns[status as usize]
    }

    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}
