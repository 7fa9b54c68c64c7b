//! End-to-end tests: layout controller, gate, and HTTP permission source
//! against a mocked backend.

mod helpers;

mod fetch_failure_test;
mod navigation_test;
mod session_test;
