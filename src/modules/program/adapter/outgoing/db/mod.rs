mod program_repository_postgres;
pub mod sea_orm_entity;

pub use program_repository_postgres::ProgramRepositoryPostgres;
