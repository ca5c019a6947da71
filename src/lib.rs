pub mod consts;
pub mod journal;
pub mod pages;
pub mod responder;
pub mod server;
pub mod store;
