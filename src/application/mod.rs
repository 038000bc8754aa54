pub mod describe_product;
