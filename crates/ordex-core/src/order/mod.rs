//! Purchase-order extraction: segmentation, rule tables and the
//! document pipeline.

pub mod layout;
pub mod master;
pub mod pipeline;
pub mod rules;
pub mod segment;

pub use layout::{Context, Layout};
pub use pipeline::OrderParser;
