// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: Postgres and in-memory repository adapters
// - presentation: HTTP handlers and routing
// - application: ports and use cases
// - domain: users, students and the hours/accolade rules

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
