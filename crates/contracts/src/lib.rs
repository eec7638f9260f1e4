//! Wire types shared between the admin frontend and the backend API.

pub mod domain;
