pub mod object_store;
pub mod role_session;
