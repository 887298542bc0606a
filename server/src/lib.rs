// Life of a request:
// 1. HTTP request comes in, axum extracts the JSON body / bearer token
// 2. The handler calls into `LoginService`
// 3. The service opens a connection, runs parameterized SQL, closes it
//    - Register: hash the password, insert the row
//    - Login: look the user up, verify the hash, sign a token
//    - User lookup: verify the token, check the user exists, compare names
// 4. Errors travel back unchanged and become a status code at the boundary
//
// System components:
//  - Relational user table (Postgres in production, SQLite in tests)
//  - Argon2id password hashing
//  - HS512 JWT issuer/verifier

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod store;

#[cfg(test)]
mod e2e_tests;
#[cfg(test)]
mod testing;

pub use error::AuthError;
pub use service::{LoginResponse, LoginService};
