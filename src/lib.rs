//! Virtual try-on mirror: places garment images on a person in a live video feed.
//!
//! Per frame, body landmarks from a pose estimator are turned into a placement box
//! for the active garment category ([`geometry`]), the selected garment ([`assets`])
//! is scaled into that box and alpha-blended onto the frame ([`composite`]).
//! [`orchestrator`] runs that loop and applies click / key input between frames.

pub mod args;
pub mod assets;
pub mod camera;
pub mod composite;
pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod landmarks;
pub mod orchestrator;
pub mod pose;
pub mod selection;
pub mod types;

pub use error::Error;
