pub mod location;
pub mod storage;
pub mod validation;
