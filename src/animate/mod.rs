//! Animate Module - Marker transitions
//!
//! - [`Interpolator`] - easing curves (fast-out-slow-in by default)
//! - [`Transition`] - one animated move or fade, plus what happens at the end
//! - [`TransitionDriver`] - runs scheduled transitions
//!   ([`ImmediateDriver`], [`FrameDriver`])

mod driver;
mod easing;
mod transition;

pub use driver::*;
pub use easing::*;
pub use transition::*;
