pub mod use_in_viewport;

pub use use_in_viewport::*;
