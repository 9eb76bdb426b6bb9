//! Collision-audio synthesis: per-object modal resonance, impact and
//! continuous-scrape generators, and a tick-driven multiplexer that routes
//! collision events reported by a host physics layer to completed PCM
//! buffers.
//!
//! A typical host: build one [`config::EngineConfig`] and
//! [`material::MaterialCatalog`] for the process, load material records
//! into the catalog, construct a [`multiplexer::Multiplexer`], register
//! listeners, then each simulation tick call [`multiplexer::Multiplexer::add_collision`]
//! for every contact and [`multiplexer::Multiplexer::tick`] once.

#![warn(nonstandard_style, rust_2018_idioms, future_incompatible)]
#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

pub mod collision;
pub mod config;
pub mod event;
pub mod impact;
pub mod material;
pub mod modes;
pub mod multiplexer;
pub mod object;
pub mod scrape;

pub use collision::{CollisionEvent, CollisionKind, Position};
pub use config::EngineConfig;
pub use material::MaterialCatalog;
pub use multiplexer::Multiplexer;
pub use object::{ImpactMaterial, ImpactMaterialCategory, ObjectDescriptor, ScrapeMaterial};
