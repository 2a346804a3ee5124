pub mod request_processor;
pub mod transition_ticker;
