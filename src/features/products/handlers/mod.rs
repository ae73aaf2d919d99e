pub mod product_handler;
