pub mod dual_session;
