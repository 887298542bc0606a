//! End-to-end tests at the HTTP request/response level.
//!
//! Each test file covers a specific scenario, driving the real router against
//! a throwaway SQLite database.

#![cfg(test)]


mod test_injection;
mod test_login;
mod test_registry;
mod test_sequence;
mod test_unreachable_database;
