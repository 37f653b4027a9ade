pub mod replay;
pub mod session;
pub mod suggest;
