//! # Floor Navigator
//!
//! A terminal-based building navigator for browsing floor plans and rooms.
//!
//! ## Features
//!
//! - Floor catalog with room metadata (built in or loaded from JSON)
//! - SVG floor maps fetched from disk or over HTTP
//! - Hover, click and keyboard selection of rooms
//! - Case-insensitive room search on the current floor
//!
//! ## Example
//!
//! ```no_run
//! use floor_navigator::catalog::builtin;
//! use floor_navigator::fetch::FileSource;
//! use floor_navigator::viewer::MapViewer;
//!
//! let mut viewer = MapViewer::new(builtin::college());
//! let request = viewer.load_floor(1).expect("Floor 1 exists");
//! let response = request.resolve(&FileSource::new("."));
//! viewer.complete_load(response);
//!
//! let matches = viewer.search("информатики");
//! println!("Matches: {matches:?}");
//! ```

pub mod catalog;
pub mod diagram;
pub mod error;
pub mod fetch;
pub mod model;
pub mod telemetry;
pub mod ui;
pub mod viewer;
