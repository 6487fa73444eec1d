// Application layer - Use cases over the loaded dataset
pub mod aggregator;
pub mod call_repository;
pub mod dashboard_service;
pub mod selection_service;
pub mod view_builder;
