pub mod a001_in_app_product;
