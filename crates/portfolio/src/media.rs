//! Project media as delivered by the CMS, reduced to what layout needs.

use common::{Breakpoint, GridResult};
use grid_layout::{remap_for_breakpoint, ItemId, PlacedItem, RawGridItem, ResponsiveSize};
use serde::{Deserialize, Serialize};

/// Default footprint of a media block whose size was never set.
const DEFAULT_MEDIA_CELLS: u32 = 5;

/// Media size as stored by the CMS; every field may be null.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSize {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub x: Option<u32>,
    pub y: Option<u32>,
}

impl MediaSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            x: None,
            y: None,
        }
    }

    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }
}

/// Fill in a missing width or height.
pub fn format_media_size(size: MediaSize) -> ResponsiveSize {
    ResponsiveSize {
        width: size.width.unwrap_or(DEFAULT_MEDIA_CELLS),
        height: size.height.unwrap_or(DEFAULT_MEDIA_CELLS),
        x: size.x,
        y: size.y,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Media that may still be awaiting its full CMS record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum Media<T> {
    Pending { id: ItemId },
    Fetched(T),
}

impl<T> Media<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Media::Fetched(_))
    }

    pub fn fetched(&self) -> Option<&T> {
        match self {
            Media::Fetched(data) => Some(data),
            Media::Pending { .. } => None,
        }
    }
}

/// Whether a media list is non-empty and fully fetched.
pub fn all_fetched<T>(medias: &[Media<T>]) -> bool {
    !medias.is_empty() && medias.iter().all(Media::is_fetched)
}

/// One media block of a project page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectMedia {
    pub id: ItemId,
    pub url: String,
    pub kind: MediaKind,
    pub size: MediaSize,
}

/// Payload carried through layout for each media block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPayload {
    pub url: String,
    pub kind: MediaKind,
}

impl ProjectMedia {
    pub fn payload(&self) -> MediaPayload {
        MediaPayload {
            url: self.url.clone(),
            kind: self.kind,
        }
    }

    /// Grid item for this media, rescaled from the editor grid to the grid
    /// of `breakpoint`.
    pub fn to_grid_item(&self, breakpoint: Breakpoint) -> GridResult<RawGridItem<MediaPayload>> {
        let size = remap_for_breakpoint(format_media_size(self.size), breakpoint)?;
        Ok(RawGridItem {
            id: Some(self.id.clone()),
            width: Some(size.width),
            height: Some(size.height),
            x: size.x,
            y: size.y,
            extra_data: Some(self.payload()),
        })
    }
}

/// A resolved media size, as sent back to the CMS after editing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSizeUpdate {
    pub id: ItemId,
    pub size: PersistedSize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSize {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

/// Resolved sizes of every placed item.
pub fn persisted_sizes<T>(items: &[PlacedItem<T>]) -> Vec<MediaSizeUpdate> {
    items
        .iter()
        .map(|item| MediaSizeUpdate {
            id: item.id.clone(),
            size: PersistedSize {
                width: item.width,
                height: item.height,
                x: item.x,
                y: item.y,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(id: i64, size: MediaSize) -> ProjectMedia {
        ProjectMedia {
            id: ItemId::Num(id),
            url: format!("/uploads/{}.jpg", id),
            kind: MediaKind::Image,
            size,
        }
    }

    #[test]
    fn test_format_media_size() {
        let size = format_media_size(MediaSize {
            width: None,
            height: Some(2),
            x: Some(1),
            y: None,
        });
        assert_eq!(size.width, 5);
        assert_eq!(size.height, 2);
        assert_eq!(size.x, Some(1));
        assert_eq!(size.y, None);
    }

    #[test]
    fn test_media_state() {
        let medias: Vec<Media<ProjectMedia>> = vec![
            Media::Fetched(media(1, MediaSize::default())),
            Media::Pending { id: ItemId::Num(2) },
        ];
        assert!(medias[0].is_fetched());
        assert!(medias[1].fetched().is_none());
        assert!(!all_fetched(&medias));
        assert!(all_fetched(&medias[..1]));
        assert!(!all_fetched::<ProjectMedia>(&[]));
    }

    #[test]
    fn test_media_serde() {
        let pending: Media<ProjectMedia> =
            serde_json::from_str(r#"{"state": "pending", "data": {"id": 4}}"#).unwrap();
        assert_eq!(pending, Media::Pending { id: ItemId::Num(4) });

        let json = r#"{"state": "fetched", "data": {"id": 5, "url": "/a.mp4", "kind": "video",
            "size": {"width": 4, "height": null, "x": null, "y": null}}}"#;
        let fetched: Media<ProjectMedia> = serde_json::from_str(json).unwrap();
        assert_eq!(fetched.fetched().unwrap().kind, MediaKind::Video);
        assert_eq!(fetched.fetched().unwrap().size.height, None);
    }

    #[test]
    fn test_to_grid_item_remaps_for_breakpoint() {
        let item = media(3, MediaSize::new(5, 6).at(8, 2))
            .to_grid_item(Breakpoint::Default)
            .unwrap();
        // Default grid is two columns wider than the editor grid.
        assert_eq!(item.width, Some(5));
        assert_eq!(item.height, Some(5));
        assert_eq!((item.x, item.y), (Some(9), Some(3)));
        assert_eq!(item.extra_data.unwrap().url, "/uploads/3.jpg");
    }

    #[test]
    fn test_persisted_sizes() {
        let placed = PlacedItem::<()> {
            id: ItemId::Num(9),
            width: 4,
            height: 3,
            x: 2,
            y: 1,
            pinned_x: None,
            pinned_y: None,
            is_pinned: false,
            extra_data: None,
        };
        let updates = persisted_sizes(&[placed]);
        assert_eq!(updates[0].id, ItemId::Num(9));
        assert_eq!(
            updates[0].size,
            PersistedSize {
                width: 4,
                height: 3,
                x: 2,
                y: 1
            }
        );
        let json = serde_json::to_value(&updates).unwrap();
        assert_eq!(json[0]["size"]["x"], 2);
    }
}
