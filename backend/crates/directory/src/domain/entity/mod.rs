//! Entities

pub mod company;
pub mod department;
pub mod employee;
pub mod position;
