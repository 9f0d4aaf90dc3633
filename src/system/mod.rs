pub mod collector;
pub mod cpu;
pub mod history;
pub mod kill;
pub mod platform;
pub mod process;
pub mod snapshot;
