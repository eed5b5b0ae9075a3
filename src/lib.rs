//! Client-side state of the rotki portfolio tracker.
//!
//! The [`crate::core::main_store::MainStore`] tracks reachability of the backend
//! service and the loading status of every data section, while
//! [`crate::core::transactions`] holds the closed vocabularies used to tag history
//! events. Everything that talks to the outside world goes through the traits
//! in [`external`] and [`transport`].

pub mod core;
pub mod external;
pub mod models;
pub mod transport;
