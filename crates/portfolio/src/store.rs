//! Project store: the state the portfolio views lay out.

use common::{Breakpoint, GridError, Viewport};
use grid_layout::{GridLayoutData, GridLayoutEngine, ItemId, RawGridItem};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::config::PortfolioConfig;
use crate::media::{format_media_size, Media, MediaKind, MediaPayload, MediaSize, ProjectMedia};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unknown project: {0}")]
    UnknownProject(ItemId),

    #[error(transparent)]
    Layout(#[from] GridError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A portfolio project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub archived: bool,
    /// Footprint of the project thumbnail on the project grid.
    #[serde(default)]
    pub size: MediaSize,
    #[serde(default)]
    pub medias: Vec<Media<ProjectMedia>>,
}

/// Payload of a project thumbnail on the project grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub title: String,
    pub client: Option<String>,
}

/// Active breakpoint and viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResponsiveState {
    pub viewport: Viewport,
    pub breakpoint: Breakpoint,
}

impl ResponsiveState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            breakpoint: viewport.breakpoint(),
        }
    }

    /// Track a new viewport; returns whether the breakpoint changed.
    pub fn update(&mut self, viewport: Viewport) -> bool {
        let breakpoint = viewport.breakpoint();
        let changed = breakpoint != self.breakpoint;
        self.viewport = viewport;
        self.breakpoint = breakpoint;
        changed
    }
}

/// Holds projects and responsive state. Constructed once and shared.
pub struct ProjectStore {
    config: PortfolioConfig,
    projects: RwLock<IndexMap<ItemId, Project>>,
    selected: RwLock<Option<ItemId>>,
    /// Only media of this kind reaches the media layout.
    filter: RwLock<Option<MediaKind>>,
    responsive: RwLock<ResponsiveState>,
}

impl ProjectStore {
    pub fn new(config: PortfolioConfig) -> Self {
        let responsive = ResponsiveState::new(config.viewport());
        Self {
            config,
            projects: RwLock::new(IndexMap::new()),
            selected: RwLock::new(None),
            filter: RwLock::new(None),
            responsive: RwLock::new(responsive),
        }
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    /// Replace all projects, keeping the order they are given in.
    pub fn set_projects(&self, projects: Vec<Project>) {
        let mut map = self.projects.write();
        map.clear();
        for project in projects {
            map.insert(project.id.clone(), project);
        }
        info!(count = map.len(), "projects loaded");
    }

    pub fn project_count(&self) -> usize {
        self.projects.read().len()
    }

    pub fn project(&self, id: &ItemId) -> Option<Project> {
        self.projects.read().get(id).cloned()
    }

    /// Select a known project. Unknown ids leave the selection unchanged.
    pub fn select(&self, id: &ItemId) -> bool {
        if !self.projects.read().contains_key(id) {
            return false;
        }
        *self.selected.write() = Some(id.clone());
        true
    }

    pub fn selected(&self) -> Option<Project> {
        let selected = self.selected.read().clone();
        selected.and_then(|id| self.project(&id))
    }

    /// Replace a known project in place.
    pub fn update_project(&self, project: Project, set_as_selected: bool) -> bool {
        let id = project.id.clone();
        {
            let mut projects = self.projects.write();
            match projects.get_mut(&id) {
                Some(existing) => *existing = project,
                None => return false,
            }
        }
        if set_as_selected {
            self.select(&id);
        }
        true
    }

    pub fn filter(&self) -> Option<MediaKind> {
        *self.filter.read()
    }

    pub fn set_filter(&self, filter: Option<MediaKind>) {
        *self.filter.write() = filter;
    }

    pub fn responsive(&self) -> ResponsiveState {
        *self.responsive.read()
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.responsive.read().breakpoint
    }

    /// Track a viewport resize; returns the active breakpoint.
    pub fn resize(&self, viewport: Viewport) -> Breakpoint {
        let mut responsive = self.responsive.write();
        if responsive.update(viewport) {
            debug!(breakpoint = %responsive.breakpoint, "breakpoint changed");
        }
        responsive.breakpoint
    }

    /// Grid items for the fetched media of a project, sized for the active
    /// breakpoint. Media still pending, or of another kind than the active
    /// filter, is left out.
    pub fn media_items(&self, id: &ItemId) -> StoreResult<Vec<RawGridItem<MediaPayload>>> {
        let project = self
            .project(id)
            .ok_or_else(|| StoreError::UnknownProject(id.clone()))?;
        let breakpoint = self.breakpoint();
        let filter = self.filter();

        let mut items = Vec::with_capacity(project.medias.len());
        for media in &project.medias {
            match media {
                Media::Fetched(media) if filter.map_or(true, |kind| kind == media.kind) => {
                    items.push(media.to_grid_item(breakpoint)?)
                }
                Media::Fetched(media) => trace!(id = %media.id, "skipping filtered media"),
                Media::Pending { id } => trace!(%id, "skipping pending media"),
            }
        }
        Ok(items)
    }

    /// Lay out the media page of a project.
    pub fn layout_media(&self, id: &ItemId) -> StoreResult<GridLayoutData<MediaPayload>> {
        let items = self.media_items(id)?;
        let responsive = self.responsive();
        let options = self.config.layout_options(responsive.breakpoint);
        let layout = GridLayoutEngine::new(responsive.viewport).layout(items, &options)?;
        debug!(project = %id, items = layout.items.len(), "media layout computed");
        Ok(layout)
    }

    /// Lay out the project grid from each project's thumbnail size.
    pub fn layout_projects(&self) -> StoreResult<GridLayoutData<ProjectPayload>> {
        let items: Vec<RawGridItem<ProjectPayload>> = self
            .projects
            .read()
            .values()
            .filter(|project| self.config.show_archived || !project.archived)
            .map(|project| {
                let size = format_media_size(project.size);
                RawGridItem {
                    id: Some(project.id.clone()),
                    width: Some(size.width),
                    height: Some(size.height),
                    x: size.x,
                    y: size.y,
                    extra_data: Some(ProjectPayload {
                        title: project.title.clone(),
                        client: project.client.clone(),
                    }),
                }
            })
            .collect();

        let responsive = self.responsive();
        let options = self.config.layout_options(responsive.breakpoint);
        Ok(GridLayoutEngine::new(responsive.viewport).layout(items, &options)?)
    }
}
