// Wed Feb 11 2026 - Alex

pub mod section;

pub use section::decode_section_dump;
