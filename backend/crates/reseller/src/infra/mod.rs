pub mod postgres;

pub use postgres::PgResellerRepository;
