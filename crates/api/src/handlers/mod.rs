pub mod leads;
pub mod progress;
pub mod sync;
