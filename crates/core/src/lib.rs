#![deny(unsafe_code)]
//! Core types and traits for backdrop, procedural page-background animations.
//!
//! Provides the `Animation` trait, the `Surface` drawing abstraction and its
//! in-memory `PixelSurface`, the per-field `AnimationScheduler`, color types
//! (`Srgb`, `Rgba`), discrete `Palette`s, the `Xorshift64` PRNG, `Scene`
//! documents, and parameter helpers.

pub mod animation;
pub mod color;
pub mod error;
pub mod palette;
pub mod params;
pub mod prng;
pub mod raster;
pub mod scene;
pub mod scheduler;
pub mod surface;

pub use animation::Animation;
pub use color::{Rgba, Srgb};
pub use error::BackdropError;
pub use palette::Palette;
pub use prng::Xorshift64;
pub use raster::PixelSurface;
pub use scene::Scene;
pub use scheduler::{AnimationScheduler, FixedRate, FrameSource, Immediate, SchedulerState};
pub use surface::{Size, Surface};
