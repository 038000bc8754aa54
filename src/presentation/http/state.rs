use crate::{application::describe_product::use_case::DescribeProductUseCase, config::Config};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub describe: Arc<DescribeProductUseCase>,
}
