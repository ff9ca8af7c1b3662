//! Core library for the Jazz Wheel practice picker.
//!
//! The heart of the crate is the transposition engine: [`pitch::resolve`]
//! maps a note spelling to its pitch class and [`transpose`] spells a moved
//! root for Concert, Bb or Eb instruments under a [`NotationPreference`].
//! Around it sit the practice repertoire, its filters, the random wheel and
//! the preference store used by the command line front end.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod pitch;
pub mod render;
pub mod scale;
pub mod store;
pub mod transpose;
pub mod wheel;

pub use catalog::{Catalog, Complexity, JazzStandard, Style, Tags, Tempo};
pub use config::{AppConfig, Preferences, Session};
pub use error::{JazzWheelError, Result};
pub use filter::Filters;
pub use pitch::{resolve, PitchClass};
pub use render::{ScaleCard, ScaleSheet};
pub use scale::{format_scale_name, ScaleRecommendation, ScaleType};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use transpose::{transpose, try_transpose, NotationPreference, Transposition};
pub use wheel::{SelectionMode, Wheel};
