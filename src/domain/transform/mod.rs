//! Transformation domain module

mod request;
mod session;

pub use request::TransformRequest;
pub use session::{InvalidStateTransition, TransformSession, TransformState};
