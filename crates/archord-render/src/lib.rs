#![forbid(unsafe_code)]

//! Scene layout, highlight state machine and SVG emission for archord.
//!
//! The pipeline is event-driven and fully synchronous: the embedding UI feeds
//! section/entity/resize/reveal events into [`ArcDiagram`], each event
//! produces a complete [`model::Scene`], and [`svg::render_scene_svg`] turns a
//! scene into markup. No state is ambient; every drawing context is an
//! explicit instance.

pub mod batch;
pub mod diagram;
pub mod highlight;
pub mod model;
pub mod surface;
pub mod svg;

pub use diagram::ArcDiagram;
pub use highlight::HighlightState;
pub use surface::{RenderSurface, Viewport};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] archord_core::Error),
    #[error("drawable area is empty ({width} x {height})")]
    EmptyViewport { width: f64, height: f64 },
    #[error("diagram driven before entity/reference data was loaded")]
    Uninitialized,
}

pub type Result<T> = std::result::Result<T, Error>;
