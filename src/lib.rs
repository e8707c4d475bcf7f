#![forbid(unsafe_code)]

//! Guided-tour overlay engine: a step sequencer that highlights target
//! elements through an SVG cut-out mask, attaches a caption balloon, and
//! advances manually, by keyboard, or on an autoplay timer. The DOM is
//! reached only through the [`DomBackend`] trait the host implements.

pub mod balloon;
pub mod config;
pub mod dom;
pub mod error;
pub mod mask;
pub mod navigator;
pub mod radius;
pub mod sequencer;
pub mod service;
pub mod timer;
pub mod visibility;

pub use config::{CalloutPosition, LocalizedText, MobilePosition, Step, TourConfig, parse_boolean};
pub use dom::{ComputedStyle, DomBackend, ElementHandle, ElementSpec, EventKind, TourAction};
pub use error::{TourError, TourResult};
pub use mask::mask_path;
pub use navigator::Navigator;
pub use radius::{CornerRadius, RadiusMetrics, border_radius_px};
pub use sequencer::{Key, KeyResponse, SkipDirection, Tour};
pub use service::TourService;
pub use timer::{Scheduler, TimerId};
pub use visibility::is_potentially_visible;
