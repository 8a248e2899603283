/// Checking the messages of the triggering event
pub mod check;
