//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of a run so `main` can
//! propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: spacetime_core::ConfigError,
    },

    /// The configured grid dimensions are unusable.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: spacetime_types::GridError,
    },

    /// Building the initial lattice failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: spacetime_world::WorldError,
    },

    /// Stepping or tracing the session failed.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: spacetime_core::SessionError,
    },

    /// Searching the current state for structures failed.
    #[error("trace error: {source}")]
    Trace {
        /// The underlying tracer error.
        #[from]
        source: spacetime_trace::TraceError,
    },

    /// Writing the scene failed.
    #[error("scene export error: {source}")]
    Scene {
        /// The underlying export error.
        #[from]
        source: spacetime_trace::SceneError,
    },

    /// The output file could not be created.
    #[error("failed to create {path}: {source}")]
    Output {
        /// Path that could not be created.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
