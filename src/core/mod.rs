pub mod cursor;
pub mod list;

pub use cursor::*;
pub use list::*;

/// 次维度（行）下标类型。
pub type Index = u32;
