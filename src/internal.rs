pub(crate) mod auth;
pub(crate) mod form;
pub(crate) mod page;
pub(crate) mod states;
pub(crate) mod transfer;
