//! Fog-of-war geometry engine for a 2D battle map.
//!
//! This crate maintains the polygon overlay that hides and reveals map
//! content: merging overlapping fog shapes into a minimal renderable set,
//! boolean-subtracting drawn or erased regions with correct hole handling,
//! simplifying hand-drawn point sequences, and proposing snap-to-grid and
//! snap-to-shape alignment guides while drawing. The host owns rendering,
//! persistence, and raw event wiring; it feeds [`session::SessionEvent`]s to
//! a [`session::Session`] and applies the [`session::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Drawing-session state machine and host-facing actions |
//! | [`fog`] | Shape-level merge and subtract operations |
//! | [`clip`] | Polygon boolean kernel (union, difference, holes) |
//! | [`guides`] | Grid and bounding-box alignment guides |
//! | [`simplify`] | Point-sequence simplification |
//! | [`bounds`] | Axis-aligned bounding boxes for guide lookup |
//! | [`shape`] | Fog shape model and edit patches |
//! | [`vec2`] | 2D vector math |
//! | [`error`] | Geometry failure types |
//! | [`consts`] | Shared numeric constants (epsilons, snap ratios, etc.) |

pub mod bounds;
pub mod clip;
pub mod consts;
pub mod error;
pub mod fog;
pub mod guides;
pub mod session;
pub mod shape;
pub mod simplify;
pub mod vec2;

pub use error::GeometryError;
pub use session::{Action, Session, SessionEvent};
pub use shape::{Shape, ShapeId, ShapeMap};
pub use vec2::Vec2;
