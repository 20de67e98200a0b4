//! Grid item descriptors and their normalization.

use common::{GridError, GridResult, GridSize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Footprint given to items that do not declare one.
pub const DEFAULT_ITEM_SIZE: GridSize = GridSize::new(5, 3);

/// Prefix of identifiers synthesized for items without one.
pub const SYNTHETIC_ID_PREFIX: &str = "grid__item__";

/// Item identifier, either numeric (CMS ids) or textual.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Num(i64),
    Str(String),
}

impl ItemId {
    /// Call-scoped identifier for the item at `index`.
    pub fn synthetic(index: usize) -> Self {
        ItemId::Str(format!("{}{}", SYNTHETIC_ID_PREFIX, index))
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, ItemId::Str(s) if s.starts_with(SYNTHETIC_ID_PREFIX))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Num(n) => write!(f, "{}", n),
            ItemId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Num(n)
    }
}

impl From<i32> for ItemId {
    fn from(n: i32) -> Self {
        ItemId::Num(n as i64)
    }
}

impl From<u32> for ItemId {
    fn from(n: u32) -> Self {
        ItemId::Num(n as i64)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Str(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::Str(s)
    }
}

/// An item as supplied by the caller; every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGridItem<T> {
    pub id: Option<ItemId>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub x: Option<u32>,
    pub y: Option<u32>,
    pub extra_data: Option<T>,
}

impl<T> RawGridItem<T> {
    pub fn new() -> Self {
        Self {
            id: None,
            width: None,
            height: None,
            x: None,
            y: None,
            extra_data: None,
        }
    }

    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::new()
        }
    }

    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_x(mut self, x: u32) -> Self {
        self.x = Some(x);
        self
    }

    pub fn with_y(mut self, y: u32) -> Self {
        self.y = Some(y);
        self
    }

    pub fn with_extra(mut self, data: T) -> Self {
        self.extra_data = Some(data);
        self
    }
}

impl<T> Default for RawGridItem<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An item with a resolved id and size, ready for packing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem<T> {
    pub id: ItemId,
    pub width: u32,
    pub height: u32,
    pub x: Option<u32>,
    pub y: Option<u32>,
    pub extra_data: Option<T>,
}

impl<T> GridItem<T> {
    #[inline]
    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Number of coordinates the caller pinned (0, 1 or 2).
    #[inline]
    pub fn pinning_weight(&self) -> u8 {
        self.x.is_some() as u8 + self.y.is_some() as u8
    }
}

/// Resolve ids and sizes. Output order matches input order.
pub fn normalize<T>(items: Vec<RawGridItem<T>>) -> GridResult<Vec<GridItem<T>>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let width = raw.width.unwrap_or(DEFAULT_ITEM_SIZE.width);
            let height = raw.height.unwrap_or(DEFAULT_ITEM_SIZE.height);
            let id = raw.id.unwrap_or_else(|| ItemId::synthetic(index));
            if width == 0 || height == 0 {
                return Err(GridError::invalid_item(format!(
                    "item {} has an empty size {}x{}",
                    id, width, height
                )));
            }
            Ok(GridItem {
                id,
                width,
                height,
                x: raw.x,
                y: raw.y,
                extra_data: raw.extra_data,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_synthetic_ids() {
        let items: Vec<RawGridItem<()>> = vec![
            RawGridItem::new(),
            RawGridItem::sized(2, 4).with_id(7),
            RawGridItem::new().with_id("hero"),
        ];
        let normalized = normalize(items).unwrap();

        assert_eq!(normalized[0].id, ItemId::from("grid__item__0"));
        assert_eq!(normalized[0].size(), DEFAULT_ITEM_SIZE);
        assert!(normalized[0].id.is_synthetic());
        assert_eq!(normalized[1].id, ItemId::Num(7));
        assert_eq!(normalized[1].size(), GridSize::new(2, 4));
        assert_eq!(normalized[2].id.to_string(), "hero");
    }

    #[test]
    fn test_partial_size() {
        let items: Vec<RawGridItem<()>> = vec![RawGridItem {
            width: Some(8),
            ..RawGridItem::new()
        }];
        let normalized = normalize(items).unwrap();
        assert_eq!(normalized[0].size(), GridSize::new(8, 3));
    }

    #[test]
    fn test_zero_size_rejected() {
        let items: Vec<RawGridItem<()>> = vec![RawGridItem::sized(0, 3)];
        assert!(matches!(normalize(items), Err(GridError::InvalidItem(_))));
    }

    #[test]
    fn test_pinning_weight() {
        let items: Vec<RawGridItem<()>> = vec![
            RawGridItem::sized(1, 1),
            RawGridItem::sized(1, 1).with_y(2),
            RawGridItem::sized(1, 1).at(3, 4),
        ];
        let weights: Vec<u8> = normalize(items)
            .unwrap()
            .iter()
            .map(GridItem::pinning_weight)
            .collect();
        assert_eq!(weights, vec![0, 1, 2]);
    }

    #[test]
    fn test_deserialize_raw_item() {
        let json = r#"{"id": 3, "width": 4, "x": 1, "extraData": {"url": "a.png"}}"#;
        let item: RawGridItem<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, Some(ItemId::Num(3)));
        assert_eq!(item.width, Some(4));
        assert_eq!(item.height, None);
        assert_eq!(item.x, Some(1));
        assert_eq!(item.extra_data.unwrap()["url"], "a.png");

        let item: RawGridItem<()> = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(item.id, Some(ItemId::from("abc")));
    }
}
