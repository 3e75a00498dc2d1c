pub mod event;
pub mod identifiers;
pub mod variant;

pub use event::{ExposureEvent, EXPOSURE_EVENT};
pub use identifiers::AnonymousId;
pub use variant::Variant;
