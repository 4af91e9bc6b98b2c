//! Workspace root package. It only exists to carry the pre-commit hook
//! configuration; the library and CLI live under `crates/`.
