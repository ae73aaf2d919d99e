/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Audit actor used when the `x-admin-actor` header is absent
pub const DEFAULT_ACTOR: &str = "admin";
