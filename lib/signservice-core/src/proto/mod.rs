pub mod clock;
pub mod session_state;
