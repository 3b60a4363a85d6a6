//! Process exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Data format error
pub const DATAERR: i32 = 65;

/// Service unavailable
pub const UNAVAILABLE: i32 = 69;

/// System error (e.g., can't start the runtime)
pub const OSERR: i32 = 71;

/// Configuration error
pub const CONFIG: i32 = 78;
