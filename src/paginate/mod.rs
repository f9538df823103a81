pub mod paginator;
