pub mod app;
pub mod auth;
pub mod dashboard;
pub mod genres;
pub mod media;
pub mod models;
pub mod present;
pub mod tmdb;
pub mod view;
