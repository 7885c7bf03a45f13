pub mod dispatch;
pub mod logging;
