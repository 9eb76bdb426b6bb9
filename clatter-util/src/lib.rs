//! Numeric building blocks for the clatter collision-audio engine.
//!
//! Nothing in this crate knows about materials, objects, or collisions —
//! it is the same kind of grab-bag of sample-rate-agnostic DSP primitives
//! that a synthesis engine leans on everywhere: evenly spaced ramps,
//! bounded convolution, piecewise-linear lookup with an amortized cursor,
//! a streaming median filter, and a Gaussian sampler with the classic
//! Box-Muller cached second draw.

#![warn(nonstandard_style, rust_2018_idioms, future_incompatible)]
#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]

pub mod gaussian;
pub mod interpolate;
pub mod median;
pub mod numeric;
pub mod pcm;

pub use gaussian::GaussianSampler;
pub use interpolate::InterpHint;
pub use median::MedianFilter;
