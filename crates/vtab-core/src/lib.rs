#![forbid(unsafe_code)]

//! Core: windowing, gesture and timing state machines for vtab.
//!
//! # Role in vtab
//! `vtab-core` holds everything that is independent of rows and cells: the
//! `[start, end)` window over an element count, the conversion of pointer
//! and wheel input into scroll ratios, and the poll-driven timers (swipe
//! inertia, debounced input) that replace background threads.
//!
//! # Primary responsibilities
//! - **RangeModel**: the rendered window and its position/range ratios.
//! - **GestureVelocityTracker**: drag deltas and swipe detection per axis.
//! - **SwipeInertia**: cancellable, geometrically decaying scroll sequence.
//! - **WheelThrottle** / **Debouncer**: input rate shaping.
//! - **Subscribers**: callback registration with drop-to-unsubscribe.
//!
//! # How it fits in the system
//! `vtab-widgets` builds the table on top: it feeds the filtered row count
//! into a `RangeModel`, drives it from surface measurements, and routes
//! gesture and wheel output into its navigation API.
//!
//! Everything here is single-threaded and time is always passed in
//! explicitly, so the same inputs always yield the same outputs.

pub mod cancellation;
pub mod config;
pub mod debounce;
pub mod error;
pub mod gesture;
pub mod inertia;
pub mod observer;
pub mod range;
pub mod wheel;

pub use config::{SwipeConfig, TouchScrollConfig, WheelConfig};
pub use error::{Result, ScrollError};
pub use gesture::{
    GestureState, GestureVelocityTracker, ScrollAxis, TouchScrollEvent, TouchScrollSource,
};
pub use range::RangeModel;
