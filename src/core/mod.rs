/// Car registration and cascading removal
pub mod car;
/// Owner-scoped lookups shared by every nested resource
pub mod ownership;
/// Installed parts of a repair record
pub mod part;
/// Repair records and their transactional create/replace
pub mod repair;
/// Repair report aggregation over a date range
pub mod report;
/// Per-car parts stock
pub mod stock_part;
/// Moving stock parts into a repair record
pub mod transfer;
/// Field-level acceptance rules
pub mod validation;
