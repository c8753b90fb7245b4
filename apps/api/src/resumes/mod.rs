// Resume persistence: entity store, ownership-checked bridge, REST handlers,
// and startup demo seeding.

pub mod bridge;
pub mod handlers;
pub mod seed;
pub mod store;
