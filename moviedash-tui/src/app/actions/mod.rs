mod auth;
mod dashboard;
