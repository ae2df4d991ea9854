/// HTTP liveness endpoints
pub mod health;
/// Daily digest broadcast scheduling
pub mod reminder;
