use super::{failure_message, DiagramRegion, MapViewer};
use crate::diagram::parse_svg;
use crate::error::ViewerError;
use crate::fetch::{LoadRequest, LoadResponse};

/// What [`MapViewer::complete_load`] did with a response.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Diagram injected and `interactive` room elements bound.
    Bound { floor: u32, interactive: usize },
    /// Markup injected but no diagram root was found; nothing is interactive.
    DiagramMissing { floor: u32 },
    /// Fetch failed; the region shows the error message.
    Failed(ViewerError),
    /// Response to a request that is no longer current; discarded.
    Stale { floor: u32 },
}

impl LoadOutcome {
    /// Line for the status bar, if the outcome deserves one.
    #[must_use]
    pub fn status_message(&self) -> Option<String> {
        match self {
            Self::Bound { .. } | Self::Stale { .. } => None,
            Self::DiagramMissing { floor } => {
                Some(ViewerError::DiagramMissing { floor: *floor }.to_string())
            }
            Self::Failed(error) => Some(error.to_string()),
        }
    }
}

impl MapViewer {
    /// Starts loading `floor`.
    ///
    /// Clears the selection and search, updates the floor title and puts the
    /// diagram region into its loading state. The returned request must be
    /// fetched and handed back to [`MapViewer::complete_load`].
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::FloorNotFound`] without touching any state if
    /// the floor is not in the catalog.
    pub fn load_floor(&mut self, floor: u32) -> Result<LoadRequest, ViewerError> {
        let record = self
            .catalog
            .get_floor(floor)
            .ok_or(ViewerError::FloorNotFound { floor })?;
        let title = record.display_name.clone();
        let asset_path = record.diagram_asset_path.clone();

        self.clear();
        self.reset_search();
        self.hovered = None;

        self.state.current_floor = floor;
        self.floor_title = title;
        self.region = DiagramRegion::Loading { floor };

        self.last_ticket += 1;
        self.pending = Some(self.last_ticket);

        tracing::info!(floor, ticket = self.last_ticket, %asset_path, "loading floor");

        Ok(LoadRequest {
            ticket: self.last_ticket,
            floor,
            asset_path,
        })
    }

    /// Floor-selector entry point. Unknown floors are ignored, as is the
    /// floor already shown or loading; a floor whose load failed is retried.
    pub fn switch_floor(&mut self, floor: u32) -> Option<LoadRequest> {
        if !self.catalog.contains(floor) {
            tracing::debug!(floor, "ignoring switch to unknown floor");
            return None;
        }

        let showing = match &self.region {
            DiagramRegion::Loading { floor: f } | DiagramRegion::Ready { floor: f, .. } => {
                Some(*f)
            }
            DiagramRegion::Empty | DiagramRegion::Failed { .. } => None,
        };
        if showing == Some(floor) {
            return None;
        }

        self.load_floor(floor).ok()
    }

    /// Loads the current floor again.
    pub fn reload(&mut self) -> Result<LoadRequest, ViewerError> {
        self.load_floor(self.state.current_floor)
    }

    /// Applies a finished fetch.
    ///
    /// Only the most recent request is honoured, so a slow response for a
    /// floor the user has already left cannot overwrite the newer floor.
    pub fn complete_load(&mut self, response: LoadResponse) -> LoadOutcome {
        let LoadResponse {
            ticket,
            floor,
            result,
        } = response;

        if self.pending != Some(ticket) {
            tracing::debug!(floor, ticket, "discarding stale diagram response");
            return LoadOutcome::Stale { floor };
        }
        self.pending = None;

        match result {
            Err(source) => {
                let error = ViewerError::AssetFetchFailed { floor, source };
                tracing::warn!(%error, "diagram load failed");
                self.clear();
                self.hovered = None;
                self.region = DiagramRegion::Failed {
                    floor,
                    message: failure_message(floor),
                };
                LoadOutcome::Failed(error)
            }
            Ok(markup) => {
                let diagram = parse_svg(&markup);
                self.region = DiagramRegion::Ready {
                    floor,
                    markup,
                    diagram,
                };

                match self.bind() {
                    Ok(interactive) => {
                        tracing::info!(floor, interactive, "floor ready");
                        LoadOutcome::Bound { floor, interactive }
                    }
                    Err(error) => {
                        tracing::warn!(%error, "diagram left without interactivity");
                        LoadOutcome::DiagramMissing { floor }
                    }
                }
            }
        }
    }
}
