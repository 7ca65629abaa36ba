//! Transitive dependency trees built from an asynchronous lookup and rendered
//! as ASCII listings.
//!
//! ```text
//! app
//! +- http
//! |  \- log
//! \- log
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
