//! Domain logic - tag values, templates and increment rules

pub mod step;
pub mod tag;
pub mod template;

pub use step::Step;
pub use tag::Tag;
pub use template::{TagTemplate, DEFAULT_TAGMESSAGE_TEMPLATE, DEFAULT_TAGNAME_TEMPLATE};
