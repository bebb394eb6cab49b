//! Scan workers

pub mod scanner;

pub use scanner::run_scan;
