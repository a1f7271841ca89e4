pub mod lock;
pub mod panel;
