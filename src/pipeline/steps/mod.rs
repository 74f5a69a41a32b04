//! Pipeline stages in execution order: validate, probe, transcode,
//! concatenate.

mod concat;
mod probe;
mod transcode;
mod validate;

pub use concat::{ConcatStep, MANIFEST_NAME};
pub use probe::ProbeStep;
pub use transcode::{TranscodeStep, MAIN_INTERMEDIATE, TAG_INTERMEDIATE};
pub use validate::ValidateStep;
