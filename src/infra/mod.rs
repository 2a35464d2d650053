//! File-backed cache, note body rendering and diagnostic timing

mod cache;
mod html;
mod timing;

pub use cache::ResultCache;
pub use html::html_to_text;
pub use timing::{TIMING_TARGET, Timer};
