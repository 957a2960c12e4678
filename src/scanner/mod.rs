//! Artifact scanner: directory listing, name matching, deletion, and the cleaner pass.

pub mod cleaner;
pub mod deletion;
pub mod listing;
pub mod patterns;
