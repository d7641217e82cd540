#[cfg(feature = "encoding")]
pub mod encoding;
#[cfg(feature = "location")]
pub mod location;
