pub mod accounts;
pub mod navigation;
pub mod options;
