pub mod xac;

#[cfg(feature = "import")]
pub mod convert;
