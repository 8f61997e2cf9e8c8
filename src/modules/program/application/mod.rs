pub mod domain;
pub mod ports;
pub mod program_use_cases;
pub mod service;
