pub mod attribute;
pub mod buffer;
pub mod byte_coder;
pub mod format;
