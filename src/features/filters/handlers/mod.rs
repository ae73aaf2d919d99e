pub mod filter_handler;
