//! Integration and unit tests for the Buchhalle application.
//!
//! - **books_api_tests**: catalog CRUD endpoints
//! - **borrow_api_tests**: borrow/return flow and ledger listing
//! - **auth_api_tests**: token issuing, cookie guard, logout
//! - **error_tests**: error envelope and validation helpers
//! - **config_tests**: configuration defaults and validation
//! - **db_tests**: schema init and legacy quantity migration
//! - **health_api_tests**: operational endpoints

pub mod config_tests;
pub mod db_tests;
pub mod error_tests;
pub mod support;
