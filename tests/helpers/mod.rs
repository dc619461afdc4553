pub mod api_test_helper;
pub mod test_data_builder;
