//! Core scanning logic.

pub mod report;
pub mod runner;
pub mod scanner;
pub mod validator;
