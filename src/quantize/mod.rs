pub mod dither;
pub mod palette;
