pub mod models {
    pub mod order;
    pub mod product;
}
