pub mod price;
pub mod product_sort;
