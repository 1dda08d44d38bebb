pub mod lenient;
pub mod logging;
