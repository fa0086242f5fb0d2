//! FFI surface for the Flutter app. All exported functions live in [`api`].

pub mod api;
