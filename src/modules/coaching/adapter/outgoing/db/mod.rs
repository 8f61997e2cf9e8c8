mod coaching_repository_postgres;
pub mod sea_orm_entity;

pub use coaching_repository_postgres::CoachingRepositoryPostgres;
