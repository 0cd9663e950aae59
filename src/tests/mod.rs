#[cfg(feature = "std")]
mod command;
mod dice;
