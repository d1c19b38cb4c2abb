mod component;
mod signal;

pub use component::Component;
pub use signal::Signal;
