pub mod core;

#[cfg(feature = "compiled_data")]
mod compiled;
