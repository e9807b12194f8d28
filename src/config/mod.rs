pub mod client;
pub mod locale;

pub use client::*;
pub use locale::*;
