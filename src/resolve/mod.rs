//! Resolution of author-facing names into concrete Companion references.
//!
//! [`connection`] turns declared connections into export instances with
//! opaque identities; [`identifier`] maps symbolic action and feedback names
//! onto the identifiers of the module each connection uses.

pub mod connection;
pub mod identifier;

pub use connection::{merge_layers, resolve_connections, ConnectionTable, ResolvedConnection};
pub use identifier::{IdentifierResolver, ResolvedEntity};
