mod console;

pub use console::generate as generate_console;
