pub mod ai;
pub mod dispatch;
pub mod note;
pub mod schema;
pub mod shared;
pub mod ticket;
