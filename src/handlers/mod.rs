// Request handlers, one module per resource.
//
// Control flow in every mutating handler: validate payload -> load or create
// the target entity -> merge (update path only) -> persist -> envelope.
pub mod auth;
pub mod invites;
pub mod members;
pub mod organizations;
pub mod products;
